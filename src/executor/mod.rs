//! Query engine components for rowsift
//!
//! Every component consumes a caller-owned record slice and returns new
//! collections; input records are never mutated.
//!
//! # Components
//!
//! 1. Comparator: multi-criteria record ordering, nulls last
//! 2. QuickSorter: stable quicksort with a bounded explicit stack
//! 3. RecordFilter: conjunctive equality and range predicates
//! 4. Grouper: partition by field value or hour-of-day window
//! 5. OutlierDetector: population z-score anomalies
//! 6. TopKSelector: bounded-heap selection of the k best records
//!
//! `AnalyticsExecutor` fronts all of them with logging and counters.
//!
//! # Invariants
//!
//! - Deterministic results: the same input always yields the same output
//! - Fail loudly on incomparable values; no silent coercion

mod comparator;
mod executor;
mod filters;
mod grouper;
mod heap;
mod outliers;
mod sorter;
mod stats;
mod topk;

pub use comparator::Comparator;
pub use executor::AnalyticsExecutor;
pub use filters::RecordFilter;
pub use grouper::{GroupKey, Grouper};
pub use heap::BoundedHeap;
pub use outliers::{
    anomaly_score, AnomalyReport, OutlierDetector, ANOMALY_FIELD_FIELD, ANOMALY_SCORE_FIELD,
    DEFAULT_ZSCORE_THRESHOLD,
};
pub use sorter::QuickSorter;
pub use stats::{mean, numeric_values, population_std_dev, FieldStats};
pub use topk::TopKSelector;
