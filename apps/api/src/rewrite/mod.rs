pub mod changes;
pub mod metrics;
pub mod phrases;
pub mod rewriter;
pub mod tense;
