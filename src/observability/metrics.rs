//! Operation counters for the engine
//!
//! - Counters only, monotonic
//! - Thread-safe, lock-free (Relaxed atomics)

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Engine operations that are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Sort,
    Filter,
    GroupByField,
    GroupByTimeWindow,
    DetectOutliers,
    SelectTopK,
}

impl Operation {
    /// Returns the event prefix used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Sort => "SORT",
            Operation::Filter => "FILTER",
            Operation::GroupByField => "GROUP_BY_FIELD",
            Operation::GroupByTimeWindow => "GROUP_BY_TIME_WINDOW",
            Operation::DetectOutliers => "DETECT_OUTLIERS",
            Operation::SelectTopK => "SELECT_TOP_K",
        }
    }
}

/// Counters for every engine operation
#[derive(Debug, Default)]
pub struct EngineMetrics {
    sorts: AtomicU64,
    filters: AtomicU64,
    field_groupings: AtomicU64,
    window_groupings: AtomicU64,
    outlier_scans: AtomicU64,
    topk_selections: AtomicU64,
    /// Records handed to the engine
    records_in: AtomicU64,
    /// Records (or grouped records) handed back
    records_out: AtomicU64,
    anomalies_flagged: AtomicU64,
    failures: AtomicU64,
}

impl EngineMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one successful operation
    pub fn record_success(&self, op: Operation, records_in: usize, records_out: usize) {
        self.counter(op).fetch_add(1, Ordering::Relaxed);
        self.records_in.fetch_add(records_in as u64, Ordering::Relaxed);
        self.records_out.fetch_add(records_out as u64, Ordering::Relaxed);
    }

    /// Records one failed operation
    pub fn record_failure(&self, op: Operation, records_in: usize) {
        self.counter(op).fetch_add(1, Ordering::Relaxed);
        self.records_in.fetch_add(records_in as u64, Ordering::Relaxed);
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds to the flagged anomaly count
    pub fn add_anomalies(&self, count: usize) {
        self.anomalies_flagged.fetch_add(count as u64, Ordering::Relaxed);
    }

    fn counter(&self, op: Operation) -> &AtomicU64 {
        match op {
            Operation::Sort => &self.sorts,
            Operation::Filter => &self.filters,
            Operation::GroupByField => &self.field_groupings,
            Operation::GroupByTimeWindow => &self.window_groupings,
            Operation::DetectOutliers => &self.outlier_scans,
            Operation::SelectTopK => &self.topk_selections,
        }
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sorts: self.sorts.load(Ordering::Relaxed),
            filters: self.filters.load(Ordering::Relaxed),
            field_groupings: self.field_groupings.load(Ordering::Relaxed),
            window_groupings: self.window_groupings.load(Ordering::Relaxed),
            outlier_scans: self.outlier_scans.load(Ordering::Relaxed),
            topk_selections: self.topk_selections.load(Ordering::Relaxed),
            records_in: self.records_in.load(Ordering::Relaxed),
            records_out: self.records_out.load(Ordering::Relaxed),
            anomalies_flagged: self.anomalies_flagged.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    /// Current counters as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub sorts: u64,
    pub filters: u64,
    pub field_groupings: u64,
    pub window_groupings: u64,
    pub outlier_scans: u64,
    pub topk_selections: u64,
    pub records_in: u64,
    pub records_out: u64,
    pub anomalies_flagged: u64,
    pub failures: u64,
}
