//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process router
//! with mock collaborators injected, so the HTTP surface can be exercised
//! without Scryfall, Spellbook or an LLM.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use bracket_core::testing::{MockCardResolver, MockComboDatabase, MockLlmClient};
use bracket_core::{Config, DeckAnalyzer, Narrator};
use bracket_server::state::AppState;

/// Re-export fixtures for test convenience
pub use bracket_core::testing::fixtures;

/// Test fixture for API testing with mock dependencies.
///
/// Provides an in-process router with fully controllable mocks for:
/// - Card resolution (MockCardResolver)
/// - Combo lookup (MockComboDatabase)
/// - Narrative generation (MockLlmClient, only with `TestConfig::with_llm`)
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_analyze() {
///     let fixture = TestFixture::new().await;
///     fixture.resolver.add_card(fixtures::card("Sol Ring", "Artifact")).await;
///
///     let response = fixture.post("/api/v1/analyze", json!({
///         "decklist": "1 Sol Ring"
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock resolver - register the cards a test deck needs
    pub resolver: Arc<MockCardResolver>,
    /// Mock combo database - configure combo results
    pub combos: Arc<MockComboDatabase>,
    /// Mock LLM - configure completions
    pub llm: Arc<MockLlmClient>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let resolver = Arc::new(MockCardResolver::new());
        let combos = Arc::new(MockComboDatabase::new());
        let llm = Arc::new(MockLlmClient::new());

        let analyzer = DeckAnalyzer::new(resolver.clone()).with_combo_database(combos.clone());
        let narrator = if test_config.enable_llm {
            Narrator::with_llm(llm.clone())
        } else {
            Narrator::fallback_only()
        };

        let state = Arc::new(AppState::new(
            Config::default(),
            Arc::new(analyzer),
            Arc::new(narrator),
        ));
        let router = bracket_server::api::create_router(state);

        Self {
            router,
            resolver,
            combos,
            llm,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Configuration for test fixture
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    /// Route narratives through the mock LLM
    pub enable_llm: bool,
}

impl TestConfig {
    pub fn with_llm() -> Self {
        Self { enable_llm: true }
    }
}
