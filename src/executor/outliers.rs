//! Z-score outlier detection
//!
//! Mean and standard deviation are population statistics over the non-null
//! values of the field. A record is flagged when `|value - mean| / std_dev`
//! is strictly greater than the threshold. Zero deviation means no outliers.

use serde::Serialize;

use super::stats::{numeric_values, FieldStats};
use crate::errors::{EngineError, EngineResult};
use crate::record::{Record, Value};

/// Default z-score threshold
pub const DEFAULT_ZSCORE_THRESHOLD: f64 = 3.0;

/// Field added to flagged records holding the z-score
pub const ANOMALY_SCORE_FIELD: &str = "anomaly_score";

/// Field added to flagged records naming the tested field
pub const ANOMALY_FIELD_FIELD: &str = "anomaly_field";

/// Flags records that deviate from the field's mean
pub struct OutlierDetector;

impl OutlierDetector {
    /// Returns annotated copies of the outlying records, in input order
    pub fn detect(records: &[Record], field: &str, threshold: f64) -> EngineResult<Vec<Record>> {
        if field.trim().is_empty() {
            return Err(EngineError::contract("outlier field is missing"));
        }

        let stats = match FieldStats::from_values(&numeric_values(records, field)?) {
            Some(stats) => stats,
            None => return Ok(Vec::new()),
        };

        let mut anomalies = Vec::new();
        for record in records {
            // Values were all validated by numeric_values above
            let value = match record.value(field).to_number(field)? {
                Some(v) => v,
                None => continue,
            };

            let z = match stats.z_score(value) {
                Some(z) => z,
                None => return Ok(Vec::new()),
            };

            if z > threshold {
                let mut flagged = record.clone();
                flagged.set(ANOMALY_SCORE_FIELD, z);
                flagged.set(ANOMALY_FIELD_FIELD, field);
                anomalies.push(flagged);
            }
        }
        Ok(anomalies)
    }
}

/// Outliers of one field, truncated for presentation
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyReport {
    /// Flagged records, at most `limit` of them
    pub anomalies: Vec<Record>,
    /// Number of flagged records before truncation
    pub total_anomalies: usize,
    pub field: String,
    pub threshold: f64,
}

#[derive(Serialize)]
struct AnomalyReportJson<'a> {
    anomalies: Vec<serde_json::Value>,
    total_anomalies: usize,
    field: &'a str,
    threshold: f64,
}

impl AnomalyReport {
    /// Runs detection and keeps the first `limit` anomalies
    pub fn build(records: &[Record], field: &str, threshold: f64, limit: usize) -> EngineResult<Self> {
        let mut anomalies = OutlierDetector::detect(records, field, threshold)?;
        let total_anomalies = anomalies.len();
        anomalies.truncate(limit);

        Ok(Self {
            anomalies,
            total_anomalies,
            field: field.to_string(),
            threshold,
        })
    }

    /// Renders the report as JSON
    pub fn to_json(&self) -> serde_json::Value {
        let json = AnomalyReportJson {
            anomalies: self.anomalies.iter().map(Record::to_json).collect(),
            total_anomalies: self.total_anomalies,
            field: &self.field,
            threshold: self.threshold,
        };
        serde_json::to_value(json).unwrap_or(serde_json::Value::Null)
    }
}

/// Reads the z-score annotation of a flagged record
pub fn anomaly_score(record: &Record) -> Option<f64> {
    record.get(ANOMALY_SCORE_FIELD).and_then(Value::as_f64)
}
