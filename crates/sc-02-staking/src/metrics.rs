//! # Staking Metrics
//!
//! Prometheus metrics for side-tx voting and commits.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! sc-02-staking = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `staking_side_votes_total` - Side handler votes (by kind, vote)
//! - `staking_post_results_total` - Post handler outcomes (by kind, code)
//! - `staking_side_latency_seconds` - Histogram of side handler latency

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_counter_vec, register_histogram, CounterVec, Histogram};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Side handler votes, labeled by message kind and vote
    pub static ref SIDE_VOTES: CounterVec = register_counter_vec!(
        "staking_side_votes_total",
        "Total side-tx votes cast",
        &["kind", "vote"]
    )
    .expect("Failed to create SIDE_VOTES metric");

    /// Post handler outcomes, labeled by message kind and diagnostic code
    pub static ref POST_RESULTS: CounterVec = register_counter_vec!(
        "staking_post_results_total",
        "Total side-tx commit outcomes",
        &["kind", "code"]
    )
    .expect("Failed to create POST_RESULTS metric");

    /// Side handler latency, dominated by the external receipt query
    pub static ref SIDE_LATENCY: Histogram = register_histogram!(
        "staking_side_latency_seconds",
        "Time taken to vote on a side-tx in seconds",
        vec![0.001, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to create SIDE_LATENCY metric");
}

/// Record a side handler vote
#[cfg(feature = "metrics")]
pub fn record_side_vote(kind: &str, vote: &str) {
    SIDE_VOTES.with_label_values(&[kind, vote]).inc();
}

/// Record a post handler outcome
#[cfg(feature = "metrics")]
pub fn record_post_result(kind: &str, code: &str) {
    POST_RESULTS.with_label_values(&[kind, code]).inc();
}

/// Record side handler latency
#[cfg(feature = "metrics")]
pub fn record_side_latency(seconds: f64) {
    SIDE_LATENCY.observe(seconds);
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_side_vote(_kind: &str, _vote: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_post_result(_kind: &str, _code: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_side_latency(_seconds: f64) {}
