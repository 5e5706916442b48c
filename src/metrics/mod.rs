//! Request results, their aggregation into run statistics, and before/after
//! comparison.
mod compare;
mod results;
mod stats;
mod types;


pub use compare::{
    ComparisonRow, GateVerdict, Trend, comparison_rows, evaluate_gate, regression_percent,
};
pub use results::{DURATION_RESULT_CAPACITY, ResultSet};
pub use stats::{STATUS_RANGE, Stats, StatusHistogram, calculate_stats};
pub use types::RequestResult;
