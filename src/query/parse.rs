//! Decoding of sort criteria and filter specs from JSON payloads
//!
//! A host request layer hands over criteria as `{"field": ..., "order": ...}`
//! objects and filters as `{"field": ..., "equals"|"min"|"max": ...}`.
//! A missing `field` is a contract violation. Unknown keys are ignored.

use serde::Deserialize;

use super::ast::{Criterion, FilterSpec, SortOrder};
use crate::errors::{EngineError, EngineResult};
use crate::record::Value;

#[derive(Debug, Deserialize)]
struct RawCriterion {
    field: Option<String>,
    order: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFilterSpec {
    field: Option<String>,
    equals: Option<serde_json::Value>,
    min: Option<serde_json::Value>,
    max: Option<serde_json::Value>,
}

fn required_field(field: Option<String>, what: &str) -> EngineResult<String> {
    match field {
        Some(f) if !f.trim().is_empty() => Ok(f),
        _ => Err(EngineError::contract(format!(
            "{} is missing its required 'field' key",
            what
        ))),
    }
}

fn scalar(field: &str, json: Option<serde_json::Value>) -> EngineResult<Option<Value>> {
    json.map(|v| Value::from_json(field, &v)).transpose()
}

impl Criterion {
    /// Decodes one criterion; `order` defaults to ascending
    pub fn from_json(json: &serde_json::Value) -> EngineResult<Self> {
        let raw: RawCriterion = serde_json::from_value(json.clone())
            .map_err(|e| EngineError::contract(format!("malformed sort criterion: {}", e)))?;

        let field = required_field(raw.field, "sort criterion")?;
        let order = match raw.order {
            Some(text) => SortOrder::parse(&text)?,
            None => SortOrder::default(),
        };
        Ok(Criterion::new(field, order))
    }
}

impl FilterSpec {
    /// Decodes one filter spec
    pub fn from_json(json: &serde_json::Value) -> EngineResult<Self> {
        let raw: RawFilterSpec = serde_json::from_value(json.clone())
            .map_err(|e| EngineError::contract(format!("malformed filter spec: {}", e)))?;

        let field = required_field(raw.field, "filter spec")?;
        Ok(FilterSpec {
            equals: scalar(&field, raw.equals)?,
            min: scalar(&field, raw.min)?,
            max: scalar(&field, raw.max)?,
            field,
        })
    }
}

/// Decodes a criteria list. A single object is accepted as a one-element list.
pub fn parse_criteria(json: &serde_json::Value) -> EngineResult<Vec<Criterion>> {
    match json {
        serde_json::Value::Array(items) => items.iter().map(Criterion::from_json).collect(),
        other => Ok(vec![Criterion::from_json(other)?]),
    }
}

/// Decodes a filter list. A single object is accepted as a one-element list.
pub fn parse_filters(json: &serde_json::Value) -> EngineResult<Vec<FilterSpec>> {
    match json {
        serde_json::Value::Array(items) => items.iter().map(FilterSpec::from_json).collect(),
        other => Ok(vec![FilterSpec::from_json(other)?]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_criterion_defaults_to_asc() {
        let c = Criterion::from_json(&json!({"field": "fare_amount"})).unwrap();
        assert_eq!(c, Criterion::asc("fare_amount"));
    }

    #[test]
    fn test_criterion_with_order() {
        let c = Criterion::from_json(&json!({"field": "fare_amount", "order": "desc"})).unwrap();
        assert_eq!(c, Criterion::desc("fare_amount"));
    }

    #[test]
    fn test_criterion_missing_field() {
        let err = Criterion::from_json(&json!({"order": "asc"})).unwrap_err();
        assert_eq!(err.code(), "ROWSIFT_CONTRACT_VIOLATION");
        assert!(err.to_string().contains("field"));
    }

    #[test]
    fn test_criterion_bad_order() {
        let err = Criterion::from_json(&json!({"field": "x", "order": "up"})).unwrap_err();
        assert_eq!(err.code(), "ROWSIFT_CONTRACT_VIOLATION");
    }

    #[test]
    fn test_filter_spec_decoding() {
        let spec =
            FilterSpec::from_json(&json!({"field": "fare_amount", "min": 10, "max": 30.5}))
                .unwrap();
        assert_eq!(spec.field, "fare_amount");
        assert_eq!(spec.min, Some(Value::Int(10)));
        assert_eq!(spec.max, Some(Value::Float(30.5)));
        assert!(spec.equals.is_none());

        let spec = FilterSpec::from_json(&json!({"field": "zone", "equals": 161})).unwrap();
        assert_eq!(spec.equals, Some(Value::Int(161)));
    }

    #[test]
    fn test_filter_spec_missing_field() {
        let err = FilterSpec::from_json(&json!({"min": 3})).unwrap_err();
        assert_eq!(err.code(), "ROWSIFT_CONTRACT_VIOLATION");
    }

    #[test]
    fn test_filter_spec_rejects_nested_bound() {
        let err = FilterSpec::from_json(&json!({"field": "f", "min": [1]})).unwrap_err();
        assert_eq!(err.code(), "ROWSIFT_CONTRACT_VIOLATION");
    }

    #[test]
    fn test_parse_lists() {
        let criteria = parse_criteria(&json!([
            {"field": "pickup_zone_id", "order": "asc"},
            {"field": "fare_amount", "order": "desc"}
        ]))
        .unwrap();
        assert_eq!(criteria.len(), 2);
        assert_eq!(criteria[1], Criterion::desc("fare_amount"));

        let single = parse_criteria(&json!({"field": "fare_amount"})).unwrap();
        assert_eq!(single.len(), 1);

        let filters = parse_filters(&json!([
            {"field": "fare_amount", "min": 10.0, "max": 30.0},
            {"field": "trip_speed", "min": 10.0}
        ]))
        .unwrap();
        assert_eq!(filters.len(), 2);

        assert!(parse_filters(&json!([{"field": "a"}, {"max": 1}])).is_err());
    }
}
