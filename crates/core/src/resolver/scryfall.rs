//! Scryfall API client.
//!
//! Scryfall asks for:
//! - A descriptive User-Agent
//! - 50-100 ms between requests

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use super::{CardResolver, Resolution, ResolverError};
use crate::card::{Card, CardFace, Color, Rarity};

/// Upper bound Scryfall accepts for one `/cards/collection` request.
pub const MAX_COLLECTION_BATCH: usize = 75;

/// Scryfall client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScryfallConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Minimum delay between requests in milliseconds.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_ms: u64,
    /// Names per collection request (1-75).
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Merge Scryfall's current Game Changer list into the embedded one at startup.
    #[serde(default)]
    pub refresh_game_changers: bool,
}

fn default_base_url() -> String {
    "https://api.scryfall.com".to_string()
}

fn default_user_agent() -> String {
    format!("BracketAnalyzer/{}", env!("CARGO_PKG_VERSION"))
}

fn default_rate_limit() -> u64 {
    100
}

fn default_batch_size() -> usize {
    MAX_COLLECTION_BATCH
}

fn default_timeout() -> u64 {
    30
}

impl Default for ScryfallConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            rate_limit_ms: default_rate_limit(),
            batch_size: default_batch_size(),
            timeout_secs: default_timeout(),
            refresh_game_changers: false,
        }
    }
}

/// Scryfall API client.
pub struct ScryfallClient {
    client: Client,
    base_url: String,
    batch_size: usize,
    last_request: Arc<Mutex<Option<Instant>>>,
    rate_limit: Duration,
}

impl ScryfallClient {
    pub fn new(config: &ScryfallConfig) -> Result<Self, ResolverError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            batch_size: config.batch_size.clamp(1, MAX_COLLECTION_BATCH),
            last_request: Arc::new(Mutex::new(None)),
            rate_limit: Duration::from_millis(config.rate_limit_ms),
        })
    }

    /// Wait for rate limit if needed.
    async fn wait_for_rate_limit(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.rate_limit {
                let wait_time = self.rate_limit - elapsed;
                debug!("Scryfall rate limit: waiting {:?}", wait_time);
                sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ResolverError> {
        let status = response.status();
        if status == 429 {
            warn!("Scryfall rate limit exceeded");
            return Err(ResolverError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<SfError>(&body)
                .map(|e| e.details)
                .unwrap_or(body);
            return Err(ResolverError::ApiError {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn fetch_batch(&self, names: &[String]) -> Result<SfCollection, ResolverError> {
        self.wait_for_rate_limit().await;

        let request = SfCollectionRequest {
            identifiers: names
                .iter()
                .map(|n| SfIdentifier { name: n.as_str() })
                .collect(),
        };

        let response = self
            .client
            .post(format!("{}/cards/collection", self.base_url))
            .json(&request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        response.json().await.map_err(|e| {
            ResolverError::ParseError(format!("Failed to parse collection response: {}", e))
        })
    }

    /// Fuzzy single-card lookup, `None` when Scryfall finds no match.
    pub async fn fuzzy_lookup(&self, name: &str) -> Result<Option<Card>, ResolverError> {
        self.wait_for_rate_limit().await;

        let url = format!(
            "{}/cards/named?fuzzy={}",
            self.base_url,
            urlencoding::encode(name)
        );
        let response = self.client.get(&url).send().await?;
        if response.status() == 404 {
            return Ok(None);
        }
        let response = Self::check_status(response).await?;

        let card: SfCard = response
            .json()
            .await
            .map_err(|e| ResolverError::ParseError(format!("Failed to parse card: {}", e)))?;
        Ok(Some(card.into_card()))
    }

    /// Names of every card matching a search query, following pagination.
    pub async fn search_names(&self, query: &str) -> Result<Vec<String>, ResolverError> {
        let mut names = Vec::new();
        let mut next = Some(format!(
            "{}/cards/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        ));

        while let Some(url) = next.take() {
            self.wait_for_rate_limit().await;
            let response = self.client.get(&url).send().await?;
            if response.status() == 404 {
                // Scryfall answers 404 for a query with no results.
                break;
            }
            let response = Self::check_status(response).await?;
            let page: SfSearchPage = response.json().await.map_err(|e| {
                ResolverError::ParseError(format!("Failed to parse search page: {}", e))
            })?;

            names.extend(page.data.into_iter().map(|c| c.name));
            if page.has_more {
                next = page.next_page;
            }
        }

        Ok(names)
    }

    /// Scryfall's current Game Changer list.
    pub async fn game_changers(&self) -> Result<Vec<String>, ResolverError> {
        let names = self.search_names("is:gamechanger").await?;
        info!("Fetched {} Game Changers from Scryfall", names.len());
        Ok(names)
    }
}

#[async_trait]
impl CardResolver for ScryfallClient {
    fn name(&self) -> &str {
        "scryfall"
    }

    async fn resolve(&self, names: &[String]) -> Result<Resolution, ResolverError> {
        let mut merge = BatchMerge::default();

        for batch in names.chunks(self.batch_size) {
            let outcome = self.fetch_batch(batch).await;
            merge.add(batch, outcome);
        }

        merge.finish()
    }
}

/// Folds per-batch collection results into one [`Resolution`].
///
/// A failed batch marks its names as not found; the whole lookup fails only
/// when no batch succeeded.
#[derive(Default)]
struct BatchMerge {
    resolution: Resolution,
    attempted: usize,
    failed: usize,
    last_error: Option<ResolverError>,
}

impl BatchMerge {
    fn add(&mut self, batch: &[String], outcome: Result<SfCollection, ResolverError>) {
        self.attempted += 1;
        match outcome {
            Ok(collection) => {
                debug!(
                    "Scryfall batch: {} requested, {} found, {} not found",
                    batch.len(),
                    collection.data.len(),
                    collection.not_found.len()
                );
                for card in collection.data {
                    self.resolution.insert(card.into_card());
                }
                for missing in collection.not_found {
                    if let Some(name) = missing.name {
                        self.resolution.mark_not_found(name);
                    }
                }
            }
            Err(e) => {
                warn!(
                    "Scryfall batch of {} names failed, treating them as not found: {}",
                    batch.len(),
                    e
                );
                self.failed += 1;
                for name in batch {
                    self.resolution.mark_not_found(name.clone());
                }
                self.last_error = Some(e);
            }
        }
    }

    fn finish(self) -> Result<Resolution, ResolverError> {
        match self.last_error {
            Some(e) if self.failed == self.attempted => Err(e),
            _ => Ok(self.resolution),
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct SfCollectionRequest<'a> {
    identifiers: Vec<SfIdentifier<'a>>,
}

#[derive(Debug, Serialize)]
struct SfIdentifier<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct SfCollection {
    #[serde(default)]
    data: Vec<SfCard>,
    #[serde(default)]
    not_found: Vec<SfNotFound>,
}

#[derive(Debug, Deserialize)]
struct SfNotFound {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SfSearchPage {
    #[serde(default)]
    data: Vec<SfCard>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SfError {
    details: String,
}

#[derive(Debug, Deserialize)]
struct SfCard {
    name: String,
    #[serde(default)]
    type_line: Option<String>,
    #[serde(default)]
    oracle_text: Option<String>,
    #[serde(default)]
    mana_cost: Option<String>,
    #[serde(default)]
    cmc: f64,
    #[serde(default)]
    color_identity: Vec<String>,
    #[serde(default)]
    rarity: Rarity,
    #[serde(default)]
    set: String,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    frame: Option<String>,
    #[serde(default)]
    layout: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    card_faces: Vec<SfFace>,
}

#[derive(Debug, Deserialize)]
struct SfFace {
    name: String,
    #[serde(default)]
    type_line: Option<String>,
    #[serde(default)]
    oracle_text: Option<String>,
    #[serde(default)]
    mana_cost: Option<String>,
}

impl SfCard {
    fn into_card(self) -> Card {
        let faces: Vec<CardFace> = self
            .card_faces
            .into_iter()
            .map(|f| CardFace {
                name: f.name,
                type_line: f.type_line.unwrap_or_default(),
                oracle_text: f.oracle_text.unwrap_or_default(),
                mana_cost: f.mana_cost.filter(|c| !c.is_empty()),
            })
            .collect();

        // Reversible and some split layouts only carry the type line per face.
        let type_line = self.type_line.unwrap_or_else(|| {
            faces
                .iter()
                .map(|f| f.type_line.as_str())
                .collect::<Vec<_>>()
                .join(" // ")
        });

        let mut color_identity: Vec<Color> = self
            .color_identity
            .iter()
            .filter_map(|c| Color::from_symbol(c))
            .collect();
        color_identity.sort();

        Card {
            name: self.name,
            type_line,
            oracle_text: self.oracle_text.unwrap_or_default(),
            mana_cost: self.mana_cost.filter(|c| !c.is_empty()),
            mana_value: self.cmc,
            color_identity,
            rarity: self.rarity,
            set_code: self.set.to_lowercase(),
            artist: self.artist,
            frame: self.frame,
            layout: self.layout,
            keywords: self.keywords,
            faces,
            quantity: 1,
        }
    }
}
