//! Multi-criteria record comparison
//!
//! Criteria are applied in order; the first one that tells two records apart
//! decides. Null values always land after non-null values in the output,
//! whatever the direction. Direction only flips the order among non-null values.

use std::cmp::Ordering;

use crate::errors::{EngineError, EngineResult};
use crate::query::{Criterion, SortOrder};
use crate::record::{Record, Value};

/// Compares records under an ordered list of criteria
pub struct Comparator;

impl Comparator {
    /// Compares `a` with `b`.
    ///
    /// `Less` means `a` comes first in the output. `Equal` means the records
    /// tie on every criterion.
    pub fn compare(a: &Record, b: &Record, criteria: &[Criterion]) -> EngineResult<Ordering> {
        for criterion in criteria {
            let ordering = Self::compare_field(a, b, criterion)?;
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }
        Ok(Ordering::Equal)
    }

    /// Compares `a` with `b` on a single criterion
    pub fn compare_field(a: &Record, b: &Record, criterion: &Criterion) -> EngineResult<Ordering> {
        Self::compare_values(a.get(&criterion.field), b.get(&criterion.field), criterion)
    }

    fn compare_values(
        a: Option<&Value>,
        b: Option<&Value>,
        criterion: &Criterion,
    ) -> EngineResult<Ordering> {
        match (a, b) {
            (None, None) => Ok(Ordering::Equal),
            (None, Some(_)) => Ok(Ordering::Greater),
            (Some(_), None) => Ok(Ordering::Less),
            (Some(a_val), Some(b_val)) => {
                let ordering = a_val.try_cmp(b_val).ok_or_else(|| {
                    EngineError::type_mismatch(&criterion.field, a_val.type_name(), b_val.type_name())
                })?;

                Ok(match criterion.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                })
            }
        }
    }

    /// Rejects criteria lists containing a criterion without a field
    pub fn validate(criteria: &[Criterion]) -> EngineResult<()> {
        criteria.iter().try_for_each(Criterion::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fare(value: impl Into<Value>) -> Record {
        Record::new().with("fare", value)
    }

    #[test]
    fn test_single_criterion_asc() {
        let result = Comparator::compare(&fare(10), &fare(20), &[Criterion::asc("fare")]).unwrap();
        assert_eq!(result, Ordering::Less);
    }

    #[test]
    fn test_large_int_vs_float_is_exact() {
        let two_53 = 1_i64 << 53;
        let result =
            Comparator::compare(&fare(two_53 + 1), &fare(two_53 as f64), &[Criterion::asc("fare")])
                .unwrap();
        assert_eq!(result, Ordering::Greater);
    }

    #[test]
    fn test_negative_zero_ties_with_zero() {
        let result = Comparator::compare(&fare(-0.0), &fare(0), &[Criterion::asc("fare")]).unwrap();
        assert_eq!(result, Ordering::Equal);
    }

    #[test]
    fn test_single_criterion_desc() {
        let result = Comparator::compare(&fare(10), &fare(20), &[Criterion::desc("fare")]).unwrap();
        assert_eq!(result, Ordering::Greater);
    }

    #[test]
    fn test_multiple_criteria() {
        let a = Record::new().with("zone", 1).with("fare", 20);
        let b = Record::new().with("zone", 1).with("fare", 10);
        let criteria = [Criterion::asc("zone"), Criterion::desc("fare")];

        // Same zone, higher fare first
        assert_eq!(Comparator::compare(&a, &b, &criteria).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_fully_tied() {
        let criteria = [Criterion::asc("fare")];
        assert_eq!(
            Comparator::compare(&fare(5), &fare(5.0), &criteria).unwrap(),
            Ordering::Equal
        );
        assert_eq!(
            Comparator::compare(&fare(5), &fare(6), &[]).unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn test_nulls_last_in_both_directions() {
        let present = fare(10);
        let missing = Record::new();

        for criterion in [Criterion::asc("fare"), Criterion::desc("fare")] {
            let criteria = [criterion];
            assert_eq!(
                Comparator::compare(&missing, &present, &criteria).unwrap(),
                Ordering::Greater
            );
            assert_eq!(
                Comparator::compare(&present, &missing, &criteria).unwrap(),
                Ordering::Less
            );
        }
    }

    #[test]
    fn test_both_null_falls_through() {
        let a = Record::new().with("zone", 2);
        let b = Record::new().with("zone", 1);
        let criteria = [Criterion::asc("fare"), Criterion::asc("zone")];
        assert_eq!(Comparator::compare(&a, &b, &criteria).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_type_mismatch() {
        let err = Comparator::compare(&fare(10), &fare("ten"), &[Criterion::asc("fare")])
            .unwrap_err();
        assert_eq!(err.code(), "ROWSIFT_TYPE_MISMATCH");
        assert_eq!(err.field(), Some("fare"));
    }

    #[test]
    fn test_validate() {
        assert!(Comparator::validate(&[Criterion::asc("a"), Criterion::desc("b")]).is_ok());
        assert!(Comparator::validate(&[Criterion::asc("a"), Criterion::desc("")]).is_err());
    }
}
