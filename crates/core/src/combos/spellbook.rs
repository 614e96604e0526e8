//! Commander Spellbook client.
//!
//! Uses the `find-my-combos` endpoint, which takes a whole card pool and
//! returns the combos fully or almost fully contained in it.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use super::types::{ComboResult, ComboTier, DeckCombos};
use super::{ComboDatabase, ComboError};

const PERMALINK_BASE: &str = "https://commanderspellbook.com/combo";

/// Commander Spellbook client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellbookConfig {
    /// Query the combo database at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Minimum delay between requests in milliseconds.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_ms: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://backend.commanderspellbook.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_rate_limit() -> u64 {
    100
}

impl Default for SpellbookConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            rate_limit_ms: default_rate_limit(),
        }
    }
}

/// Commander Spellbook API client.
pub struct SpellbookClient {
    client: Client,
    base_url: String,
    last_request: Arc<Mutex<Option<Instant>>>,
    rate_limit: Duration,
}

impl SpellbookClient {
    pub fn new(config: &SpellbookConfig) -> Result<Self, ComboError> {
        let client = Client::builder()
            .user_agent(concat!("bracket-analyzer/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            last_request: Arc::new(Mutex::new(None)),
            rate_limit: Duration::from_millis(config.rate_limit_ms),
        })
    }

    async fn wait_for_rate_limit(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.rate_limit {
                sleep(self.rate_limit - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }
}

#[derive(Debug, Serialize)]
struct FindMyCombosRequest<'a> {
    main: Vec<CardRef<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    commanders: Vec<CardRef<'a>>,
}

#[derive(Debug, Serialize)]
struct CardRef<'a> {
    card: &'a str,
}

#[derive(Debug, Deserialize)]
struct FindMyCombosResponse {
    results: SbResults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SbResults {
    #[serde(default)]
    included: Vec<SbCombo>,
    #[serde(default)]
    almost_included: Vec<SbCombo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SbCombo {
    id: String,
    #[serde(default)]
    uses: Vec<SbUse>,
    #[serde(default)]
    produces: Vec<SbProduce>,
    #[serde(default)]
    bracket_tag: Option<String>,
    #[serde(default)]
    popularity: Option<u32>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    legalities: Option<SbLegalities>,
}

#[derive(Debug, Deserialize)]
struct SbUse {
    card: SbCard,
}

#[derive(Debug, Deserialize)]
struct SbCard {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SbProduce {
    feature: SbFeature,
}

#[derive(Debug, Deserialize)]
struct SbFeature {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SbLegalities {
    #[serde(default = "default_enabled")]
    commander: bool,
}

impl SbCombo {
    fn legal_in_commander(&self) -> bool {
        self.legalities.as_ref().map(|l| l.commander).unwrap_or(true)
    }

    fn into_result(self, deck: &HashSet<String>, near_miss: bool) -> ComboResult {
        let card_names: Vec<String> = self.uses.into_iter().map(|u| u.card.name).collect();
        let missing_cards = if near_miss {
            card_names
                .iter()
                .filter(|name| !in_deck(deck, name))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        ComboResult {
            permalink: Some(format!("{}/{}", PERMALINK_BASE, self.id)),
            id: self.id,
            card_names,
            produces: self.produces.into_iter().map(|p| p.feature.name).collect(),
            tier: self.bracket_tag.as_deref().and_then(ComboTier::from_tag),
            popularity: self.popularity.unwrap_or(0),
            description: self.description.filter(|d| !d.trim().is_empty()),
            missing_cards,
        }
    }
}

fn in_deck(deck: &HashSet<String>, name: &str) -> bool {
    let lower = name.to_lowercase();
    if deck.contains(&lower) {
        return true;
    }
    match lower.split_once(" // ") {
        Some((front, _)) => deck.contains(front),
        None => false,
    }
}

fn deck_index(card_names: &[String]) -> HashSet<String> {
    let mut deck = HashSet::new();
    for name in card_names {
        let lower = name.to_lowercase();
        if let Some((front, _)) = lower.split_once(" // ") {
            deck.insert(front.to_string());
        }
        deck.insert(lower);
    }
    deck
}

/// Convert a raw response into [`DeckCombos`], dropping combos that are not
/// legal in Commander.
fn parse_response(body: &str, card_names: &[String]) -> Result<DeckCombos, ComboError> {
    let response: FindMyCombosResponse = serde_json::from_str(body)
        .map_err(|e| ComboError::ParseError(format!("Failed to parse combo response: {}", e)))?;

    let deck = deck_index(card_names);
    let mut combos = DeckCombos {
        confirmed: response
            .results
            .included
            .into_iter()
            .filter(SbCombo::legal_in_commander)
            .map(|c| c.into_result(&deck, false))
            .collect(),
        near_miss: response
            .results
            .almost_included
            .into_iter()
            .filter(SbCombo::legal_in_commander)
            .map(|c| c.into_result(&deck, true))
            .collect(),
    };
    combos.sort_by_popularity();
    Ok(combos)
}

#[async_trait]
impl ComboDatabase for SpellbookClient {
    fn name(&self) -> &str {
        "spellbook"
    }

    async fn find_combos(
        &self,
        card_names: &[String],
        commander: Option<&str>,
    ) -> Result<DeckCombos, ComboError> {
        self.wait_for_rate_limit().await;

        let request = FindMyCombosRequest {
            main: card_names
                .iter()
                .map(|n| CardRef { card: n.as_str() })
                .collect(),
            commanders: commander
                .map(|c| vec![CardRef { card: c }])
                .unwrap_or_default(),
        };

        let url = format!("{}/find-my-combos/", self.base_url);
        debug!("Spellbook lookup: {} cards", card_names.len());

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if status == 429 {
            warn!("Spellbook rate limit exceeded");
            return Err(ComboError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ComboError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let combos = parse_response(&body, card_names)?;
        debug!(
            "Spellbook found {} confirmed and {} near-miss combos",
            combos.confirmed.len(),
            combos.near_miss.len()
        );
        Ok(combos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "results": {
            "identity": "UB",
            "included": [
                {
                    "id": "1414-2730",
                    "uses": [
                        {"card": {"name": "Thassa's Oracle", "typeLine": "Creature — Merfolk Wizard"}, "zoneLocations": ["H"]},
                        {"card": {"name": "Demonic Consultation"}, "zoneLocations": ["H"]}
                    ],
                    "produces": [{"feature": {"name": "Win the game"}}],
                    "bracketTag": "R",
                    "popularity": 25000,
                    "description": "Cast Demonic Consultation naming a card not in the deck.",
                    "legalities": {"commander": true}
                },
                {
                    "id": "5-6",
                    "uses": [
                        {"card": {"name": "Isochron Scepter"}},
                        {"card": {"name": "Dramatic Reversal"}}
                    ],
                    "produces": [{"feature": {"name": "Infinite mana"}}],
                    "bracketTag": "PW",
                    "popularity": 30000
                },
                {
                    "id": "9-9",
                    "uses": [{"card": {"name": "Banned Thing"}}],
                    "produces": [],
                    "legalities": {"commander": false}
                }
            ],
            "almostIncluded": [
                {
                    "id": "7-8",
                    "uses": [
                        {"card": {"name": "Dockside Extortionist"}},
                        {"card": {"name": "Temur Sabertooth"}}
                    ],
                    "produces": [{"feature": {"name": "Infinite Treasure"}}],
                    "bracketTag": "S",
                    "popularity": null
                }
            ]
        }
    }"#;

    fn deck() -> Vec<String> {
        [
            "Thassa's Oracle",
            "Demonic Consultation",
            "Isochron Scepter",
            "Dramatic Reversal",
            "Temur Sabertooth",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_parse_response_confirmed_sorted_by_popularity() {
        let combos = parse_response(RESPONSE, &deck()).unwrap();
        assert_eq!(combos.confirmed.len(), 2);
        assert_eq!(combos.confirmed[0].id, "5-6");
        assert_eq!(combos.confirmed[1].tier, Some(ComboTier::Ruthless));
        assert_eq!(
            combos.confirmed[1].permalink.as_deref(),
            Some("https://commanderspellbook.com/combo/1414-2730")
        );
        assert!(combos.has_infinite());
    }

    #[test]
    fn test_parse_response_near_miss_missing_cards() {
        let combos = parse_response(RESPONSE, &deck()).unwrap();
        assert_eq!(combos.near_miss.len(), 1);
        assert_eq!(combos.near_miss[0].missing_cards, vec!["Dockside Extortionist"]);
        assert_eq!(combos.near_miss[0].popularity, 0);
    }

    #[test]
    fn test_parse_response_invalid_json() {
        let result = parse_response("not json", &deck());
        assert!(matches!(result, Err(ComboError::ParseError(_))));
    }

    #[test]
    fn test_in_deck_matches_front_face() {
        let deck = deck_index(&["Tergrid, God of Fright".to_string()]);
        assert!(in_deck(&deck, "Tergrid, God of Fright // Tergrid's Lantern"));
        assert!(!in_deck(&deck, "Sol Ring"));
    }

    #[test]
    fn test_config_defaults_from_toml() {
        let config: SpellbookConfig = toml::from_str("enabled = false").unwrap();
        assert!(!config.enabled);
        assert_eq!(config.base_url, "https://backend.commanderspellbook.com");
        assert_eq!(config.timeout_secs, 30);
    }
}
