//! Aggregation of call graph data into summary metrics.
//!
//! This module computes:
//! - Inline time per tracked category (key prefix)
//! - Hot functions (top inline-time consumers)

pub mod categories;
pub mod metrics;

// Re-export main types and functions
pub use categories::{normalize_categories, time_per_category, CategoryTimes};
pub use metrics::calculate_hot_functions;
