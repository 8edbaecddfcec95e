//! Scalar values carried by records
//!
//! A value is a number (integral or floating), text, a timestamp, or null.
//! Integral and floating numbers are one kind and compare numerically.
//! No other cross-kind comparison is defined.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Timelike};

use crate::errors::{EngineError, EngineResult};

/// Canonical text rendering of timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Accepted naive timestamp layouts for text values
const TEXT_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// A scalar field value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing value; an absent field is identical to this
    #[default]
    Null,
    /// Integral number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Text(String),
    /// Naive (zone-less) timestamp
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Returns true for `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn is_nan(&self) -> bool {
        matches!(self, Value::Float(f) if f.is_nan())
    }

    /// Returns the kind name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) | Value::Float(_) => "number",
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
        }
    }

    /// Returns the numeric value for numbers only
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the text for text values only
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Orders two values of the same kind.
    ///
    /// Returns `None` when the kinds are incompatible or either side is null.
    pub fn try_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Float(b)) => Some(cmp_int_float(*a, *b)),
            (Value::Float(a), Value::Int(b)) => Some(cmp_int_float(*b, *a).reverse()),
            (Value::Float(a), Value::Float(b)) => Some(cmp_floats(*a, *b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Equality without coercion across kinds.
    ///
    /// Numbers compare numerically, so `Int(161)` equals `Float(161.0)`.
    /// Null never equals anything, including null.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                !self.is_nan() && !other.is_nan() && self.try_cmp(other) == Some(Ordering::Equal)
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            _ => false,
        }
    }

    /// Coerces the value to a number for aggregation.
    ///
    /// Null yields `None`. Text is accepted when it parses as a number.
    pub fn to_number(&self, field: &str) -> EngineResult<Option<f64>> {
        match self {
            Value::Null => Ok(None),
            Value::Int(i) => Ok(Some(*i as f64)),
            Value::Float(f) => Ok(Some(*f)),
            Value::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| EngineError::numeric_conversion(field, format!("'{}' is not a number", s))),
            Value::Timestamp(ts) => Err(EngineError::numeric_conversion(
                field,
                format!("timestamp {} is not a number", ts.format(TIMESTAMP_FORMAT)),
            )),
        }
    }

    /// Resolves the value as a timestamp, parsing text if needed
    pub fn to_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            Value::Text(s) => parse_timestamp(s),
            _ => None,
        }
    }

    /// Hour-of-day component of a timestamp value
    pub fn hour_of_day(&self) -> Option<u32> {
        self.to_timestamp().map(|ts| ts.hour())
    }

    /// Converts a JSON scalar into a value.
    ///
    /// Booleans, arrays and objects are not scalars of the record model.
    pub fn from_json(field: &str, json: &serde_json::Value) -> EngineResult<Value> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Ok(Value::Null),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Float(f))
                } else {
                    Err(EngineError::numeric_conversion(field, n.to_string()))
                }
            }
            Json::String(s) => Ok(Value::Text(s.clone())),
            Json::Bool(_) => Err(EngineError::contract(format!(
                "field '{}' holds a boolean, which is not a supported scalar",
                field
            ))),
            Json::Array(_) | Json::Object(_) => Err(EngineError::contract(format!(
                "field '{}' holds a nested value, which is not a supported scalar",
                field
            ))),
        }
    }

    /// Renders the value as JSON.
    ///
    /// Non-finite floats become null.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Null => Json::Null,
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Text(s) => Json::String(s.clone()),
            Value::Timestamp(ts) => Json::String(ts.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

/// Lower bound of the `i64` range as a float (exactly -2^63)
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;

/// Orders floats numerically: `-0.0` equals `0.0` and NaN sorts after
/// every number (NaNs tie with each other).
fn cmp_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => (a + 0.0).partial_cmp(&(b + 0.0)).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer with a float; no rounding of the integer.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return Ordering::Less;
    }
    if f >= -I64_MIN_F64 {
        return Ordering::Less;
    }
    if f < I64_MIN_F64 {
        return Ordering::Greater;
    }

    // Integral part now fits in i64 exactly
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => {
            let fraction = f - whole;
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        ordering => ordering,
    }
}

/// Parses a text timestamp in one of the accepted layouts.
///
/// RFC 3339 input keeps its wall-clock time; the offset is discarded.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    TEXT_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
            Value::Timestamp(ts) => write!(f, "{}", ts.format(TIMESTAMP_FORMAT)),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
