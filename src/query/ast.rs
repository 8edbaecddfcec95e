//! Query specification structures
//!
//! Sort criteria and filter specs consumed by the executor components.

use crate::errors::{EngineError, EngineResult};
use crate::record::Value;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Parses `asc` / `desc`, case-insensitively
    pub fn parse(text: &str) -> EngineResult<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(EngineError::contract(format!(
                "unknown sort order '{}', expected 'asc' or 'desc'",
                other
            ))),
        }
    }
}

/// One level of a multi-key sort order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    pub order: SortOrder,
}

impl Criterion {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }

    /// Rejects a criterion without a field name
    pub fn validate(&self) -> EngineResult<()> {
        if self.field.trim().is_empty() {
            return Err(EngineError::contract("sort criterion is missing its field"));
        }
        Ok(())
    }
}

/// Range or equality predicate on one field.
///
/// When `equals` is present the bounds are ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSpec {
    /// Field to test
    pub field: String,
    /// Exact match value
    pub equals: Option<Value>,
    /// Inclusive lower bound
    pub min: Option<Value>,
    /// Inclusive upper bound
    pub max: Option<Value>,
}

impl FilterSpec {
    /// Create an equality spec
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            equals: Some(value.into()),
            ..Default::default()
        }
    }

    /// Create an inclusive range spec
    pub fn range(field: impl Into<String>, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            min: Some(min.into()),
            max: Some(max.into()),
            ..Default::default()
        }
    }

    /// Create a lower-bound spec
    pub fn at_least(field: impl Into<String>, min: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            min: Some(min.into()),
            ..Default::default()
        }
    }

    /// Create an upper-bound spec
    pub fn at_most(field: impl Into<String>, max: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            max: Some(max.into()),
            ..Default::default()
        }
    }

    /// Returns true if this is an equality spec
    pub fn is_equality(&self) -> bool {
        self.equals.is_some()
    }

    /// Rejects a spec without a field name
    pub fn validate(&self) -> EngineResult<()> {
        if self.field.trim().is_empty() {
            return Err(EngineError::contract("filter spec is missing its field"));
        }
        Ok(())
    }
}
