//! Deck analysis and narrative endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use bracket_core::{AnalysisError, DeckAnalysis, Narrative, NarrativeMode, BRACKETS};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// One card per line, optionally prefixed with a quantity.
    pub decklist: String,
    #[serde(default)]
    pub commander: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NarrativeRequest {
    pub decklist: String,
    #[serde(default)]
    pub commander: Option<String>,
    /// Ask for adjustment advice towards this bracket instead of play patterns.
    #[serde(default)]
    pub target_bracket: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct NarrativeResponse {
    pub analysis: DeckAnalysis,
    pub narrative: Narrative,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn analysis_error(e: AnalysisError) -> ApiError {
    let status = match &e {
        AnalysisError::EmptyDecklist => StatusCode::BAD_REQUEST,
        AnalysisError::NoCardsResolved { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisError::Resolver(_) => StatusCode::BAD_GATEWAY,
    };
    if status.is_server_error() {
        warn!("Analysis failed: {}", e);
    } else {
        debug!("Analysis rejected: {}", e);
    }
    error_response(status, e.to_string())
}

/// Blank commander fields count as absent.
fn commander_name(commander: &Option<String>) -> Option<&str> {
    commander
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/analyze
pub async fn analyze_deck(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<DeckAnalysis>, ApiError> {
    let analysis = state
        .analyzer()
        .analyze(&request.decklist, commander_name(&request.commander))
        .await
        .map_err(analysis_error)?;

    Ok(Json(analysis))
}

/// POST /api/v1/narrative
///
/// Analyses the deck, then renders play-pattern prose or, with
/// `target_bracket`, advice for moving the deck to that bracket.
pub async fn render_narrative(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NarrativeRequest>,
) -> Result<Json<NarrativeResponse>, ApiError> {
    let mode = match request.target_bracket {
        None => NarrativeMode::PlayPatterns,
        Some(target) if BRACKETS.iter().any(|b| b.number == target) => {
            NarrativeMode::AdjustTo { target }
        }
        Some(target) => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("target_bracket must be between 1 and 5, got {}", target),
            ));
        }
    };

    let analysis = state
        .analyzer()
        .analyze(&request.decklist, commander_name(&request.commander))
        .await
        .map_err(analysis_error)?;

    let narrative = state.narrator().render(&analysis, mode).await;

    Ok(Json(NarrativeResponse {
        analysis,
        narrative,
    }))
}
