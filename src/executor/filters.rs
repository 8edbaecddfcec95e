//! Range and equality filtering
//!
//! A record passes a spec when its value is non-null and either equals the
//! spec's `equals`, or lies inside the inclusive `[min, max]` bounds that are
//! present. All specs must pass (AND semantics). Relative order is kept.

use std::cmp::Ordering;

use crate::errors::{EngineError, EngineResult};
use crate::query::FilterSpec;
use crate::record::{Record, Value};

/// Evaluates filter specs against records
pub struct RecordFilter;

impl RecordFilter {
    /// Returns the records matching every spec, in input order
    pub fn filter(records: &[Record], specs: &[FilterSpec]) -> EngineResult<Vec<Record>> {
        specs.iter().try_for_each(FilterSpec::validate)?;

        if specs.is_empty() {
            return Ok(records.to_vec());
        }

        let mut result = Vec::new();
        for record in records {
            if Self::matches_all(record, specs)? {
                result.push(record.clone());
            }
        }
        Ok(result)
    }

    /// Checks all specs, stopping at the first one that fails
    pub fn matches_all(record: &Record, specs: &[FilterSpec]) -> EngineResult<bool> {
        for spec in specs {
            if !Self::matches(record, spec)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Checks a single spec
    pub fn matches(record: &Record, spec: &FilterSpec) -> EngineResult<bool> {
        let value = match record.get(&spec.field) {
            Some(v) => v,
            None => return Ok(false), // Null never matches
        };

        if let Some(expected) = &spec.equals {
            return Ok(value.loose_eq(expected));
        }

        if let Some(min) = &spec.min {
            if Self::order(&spec.field, value, min)? == Ordering::Less {
                return Ok(false);
            }
        }

        if let Some(max) = &spec.max {
            if Self::order(&spec.field, value, max)? == Ordering::Greater {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn order(field: &str, value: &Value, bound: &Value) -> EngineResult<Ordering> {
        value
            .try_cmp(bound)
            .ok_or_else(|| EngineError::type_mismatch(field, value.type_name(), bound.type_name()))
    }
}
