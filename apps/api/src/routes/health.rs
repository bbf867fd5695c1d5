use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Service version, whether external rewriting is live, and reconciliation counters.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-optimizer-api",
        "external_rewrite": state.config.enable_external_rewrite && state.optimizer.external_rewrite_available(),
        "reconciliation": state.reconcile_stats.snapshot(),
    }))
}
