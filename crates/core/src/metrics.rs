//! Prometheus metrics for core components.
//!
//! Covers finished analyses, resolution gaps, collaborator failures and
//! narrative rendering. The server registers these alongside its HTTP metrics.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Analysis Metrics
// =============================================================================

/// Finished analyses by final bracket.
pub static ANALYSES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("bracket_analyses_total", "Total deck analyses by final bracket"),
        &["bracket"], // "1".."5"
    )
    .unwrap()
});

/// Analysis duration, resolution and combo lookup included.
pub static ANALYSIS_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bracket_analysis_duration_seconds",
            "Duration of a full deck analysis",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["result"], // "success", "error"
    )
    .unwrap()
});

/// Card names the resolver could not find.
pub static UNRESOLVED_CARDS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "bracket_unresolved_cards_total",
        "Total decklist names the resolver could not find",
    )
    .unwrap()
});

// =============================================================================
// Collaborator Metrics
// =============================================================================

/// Collaborator failures that were downgraded to a neutral default.
pub static COLLABORATOR_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bracket_collaborator_failures_total",
            "Total collaborator failures",
        ),
        &["collaborator"], // "resolver", "combos", "llm"
    )
    .unwrap()
});

/// External service request duration.
pub static EXTERNAL_SERVICE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bracket_external_service_duration_seconds",
            "Duration of external service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["service", "operation"],
    )
    .unwrap()
});

// =============================================================================
// Narrative Metrics
// =============================================================================

/// Narratives rendered by method.
pub static NARRATIVES_RENDERED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("bracket_narratives_total", "Total narratives rendered"),
        &["method"], // "llm", "fallback"
    )
    .unwrap()
});

/// LLM tokens used.
pub static LLM_TOKENS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("bracket_llm_tokens_total", "Total LLM tokens used"),
        &["provider", "direction"], // direction: "input", "output"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(ANALYSES_TOTAL.clone()),
        Box::new(ANALYSIS_DURATION.clone()),
        Box::new(UNRESOLVED_CARDS.clone()),
        Box::new(COLLABORATOR_FAILURES.clone()),
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
        Box::new(NARRATIVES_RENDERED.clone()),
        Box::new(LLM_TOKENS.clone()),
    ]
}
