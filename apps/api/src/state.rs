use std::sync::Arc;

use crate::config::Config;
use crate::optimizer::Optimizer;
use crate::reconcile::reconciler::ReconcileStats;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub optimizer: Arc<Optimizer>,
    pub config: Config,
    /// Reconciliation counters shared with the optimizer; reported by /health.
    pub reconcile_stats: Arc<ReconcileStats>,
}

impl AppState {
    pub fn new(optimizer: Optimizer, config: Config) -> Self {
        let reconcile_stats = optimizer.stats();
        Self {
            optimizer: Arc::new(optimizer),
            config,
            reconcile_stats,
        }
    }
}
