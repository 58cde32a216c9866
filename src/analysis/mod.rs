//! Aggregation passes over loaded results.
//!
//! Every aggregator is a single, stateless scan of the same result set.

pub mod aggregator;
mod stats;

pub use aggregator::*;
