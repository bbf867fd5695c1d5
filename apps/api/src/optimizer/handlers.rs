//! Axum route handlers for the Optimizer API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::report::{OptimizationAnalysis, OptimizationResult};
use crate::optimizer::suggestions::Suggestion;
use crate::optimizer::{AnalyzeRequest, OptimizeRequest};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Lints and scores the resume. No rewriting.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<OptimizationAnalysis>, AppError> {
    let analysis = state
        .optimizer
        .analyze(&request.resume_text, request.job_description.as_deref())?;
    Ok(Json(analysis))
}

/// POST /api/v1/optimize
///
/// Rule-based rewrite, optionally reconciled against the external rewriter.
/// External rewriting is skipped when the service has it disabled.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(mut request): Json<OptimizeRequest>,
) -> Result<Json<OptimizationResult>, AppError> {
    request.use_external_rewrite &= state.config.enable_external_rewrite;
    let result = state.optimizer.optimize(&request).await?;
    Ok(Json(result))
}

/// POST /api/v1/suggestions
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let suggestions = state
        .optimizer
        .suggest(&request.resume_text, request.job_description.as_deref())?;
    Ok(Json(SuggestionsResponse { suggestions }))
}
