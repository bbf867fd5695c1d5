//! Resume lint-and-rewrite engine.
//!
//! `optimizer::Optimizer` is the entry point: `analyze`, `optimize`, `suggest`. The HTTP
//! surface in `routes` is a thin wrapper used by the `resume-optimizer-api` binary.

pub mod config;
pub mod errors;
pub mod lint;
pub mod llm_client;
pub mod models;
pub mod optimizer;
pub mod reconcile;
pub mod rewrite;
pub mod routes;
pub mod scoring;
pub mod state;
