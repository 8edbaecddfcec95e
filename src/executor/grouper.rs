//! Partitioning of record collections
//!
//! Groups are returned in key order. Records whose key is null (or, for time
//! windows, whose timestamp is missing or unparseable) are dropped silently.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{EngineError, EngineResult};
use crate::record::{Record, Value};

/// A non-null value used as a partition key.
///
/// Keys are totally ordered: numbers, then text, then timestamps.
/// Integral and floating keys with the same numeric value are the same key.
#[derive(Debug, Clone)]
pub struct GroupKey(Value);

impl GroupKey {
    /// Wraps a value; null is not a key
    pub fn new(value: Value) -> Option<Self> {
        if value.is_null() {
            None
        } else {
            Some(GroupKey(value))
        }
    }

    /// Returns the underlying value
    pub fn value(&self) -> &Value {
        &self.0
    }

    fn kind_rank(&self) -> u8 {
        match self.0 {
            Value::Null => 0,
            Value::Int(_) | Value::Float(_) => 1,
            Value::Text(_) => 2,
            Value::Timestamp(_) => 3,
        }
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .try_cmp(&other.0)
            .unwrap_or_else(|| self.kind_rank().cmp(&other.kind_rank()))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Partitions collections by field value or time of day
pub struct Grouper;

impl Grouper {
    /// Groups records by the raw value of `field`
    pub fn group_by_field(
        records: &[Record],
        field: &str,
    ) -> EngineResult<BTreeMap<GroupKey, Vec<Record>>> {
        if field.trim().is_empty() {
            return Err(EngineError::contract("group field is missing"));
        }

        let mut groups: BTreeMap<GroupKey, Vec<Record>> = BTreeMap::new();
        for record in records {
            if let Some(key) = record.get(field).cloned().and_then(GroupKey::new) {
                groups.entry(key).or_default().push(record.clone());
            }
        }
        Ok(groups)
    }

    /// Groups records into hour-of-day windows of `window_hours`.
    ///
    /// Only the hour of the timestamp is used; the calendar date is ignored,
    /// so 08:15 on two different days lands in the same window.
    /// Labels read `"HH:00-HH:00"`; the end hour is `start + window_hours`
    /// and is not wrapped at 24.
    pub fn group_by_time_window(
        records: &[Record],
        timestamp_field: &str,
        window_hours: u32,
    ) -> EngineResult<BTreeMap<String, Vec<Record>>> {
        if timestamp_field.trim().is_empty() {
            return Err(EngineError::contract("timestamp field is missing"));
        }
        if window_hours == 0 {
            return Err(EngineError::contract("window_hours must be at least 1"));
        }

        let mut groups: BTreeMap<String, Vec<Record>> = BTreeMap::new();
        for record in records {
            let hour = match record.get(timestamp_field).and_then(Value::hour_of_day) {
                Some(h) => h,
                None => continue,
            };
            groups
                .entry(Self::window_label(hour, window_hours))
                .or_default()
                .push(record.clone());
        }
        Ok(groups)
    }

    /// Label of the window containing `hour`
    pub fn window_label(hour: u32, window_hours: u32) -> String {
        let start = (hour / window_hours) * window_hours;
        format!("{:02}:00-{:02}:00", start, start + window_hours)
    }
}
