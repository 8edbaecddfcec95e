//! Population statistics over numeric fields

use serde::Serialize;

use crate::errors::EngineResult;
use crate::record::Record;

/// Arithmetic mean; `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation around `mean` (divides by N)
pub fn population_std_dev(values: &[f64], mean: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum_squared_diff: f64 = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum();
    Some((sum_squared_diff / values.len() as f64).sqrt())
}

/// Summary of one numeric field across a collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    /// Number of non-null values
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl FieldStats {
    /// Computes stats over raw values; `None` when there are none
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;
        let std_dev = population_std_dev(values, mean)?;
        Some(Self {
            count: values.len(),
            mean,
            std_dev,
        })
    }

    /// Computes stats over the non-null values of `field`
    pub fn from_records(records: &[Record], field: &str) -> EngineResult<Option<Self>> {
        let values = numeric_values(records, field)?;
        Ok(Self::from_values(&values))
    }

    /// Absolute z-score of `value`; `None` when the deviation is zero
    pub fn z_score(&self, value: f64) -> Option<f64> {
        if self.std_dev == 0.0 {
            return None;
        }
        Some((value - self.mean).abs() / self.std_dev)
    }
}

/// Collects the non-null values of `field` as numbers, in input order
pub fn numeric_values(records: &[Record], field: &str) -> EngineResult<Vec<f64>> {
    let mut values = Vec::with_capacity(records.len());
    for record in records {
        if let Some(v) = record.value(field).to_number(field)? {
            values.push(v);
        }
    }
    Ok(values)
}
