//! Property-based tests for the query engine.
//!
//! Random collections with nullable numeric fields are pushed through every
//! component and checked against simple reference definitions.

use proptest::prelude::*;
use rowsift::executor::{
    Comparator, FieldStats, GroupKey, Grouper, OutlierDetector, QuickSorter, RecordFilter,
    TopKSelector,
};
use rowsift::{Criterion, FilterSpec, Record, SortOrder, Value};
use std::cmp::Ordering;

/// Strategy for an optional small integer; `None` becomes a missing field.
fn cell_strategy() -> impl Strategy<Value = Option<i64>> {
    prop::option::weighted(0.85, -20i64..20i64)
}

/// Strategy for records with an id and two nullable keys.
fn records_strategy(max_rows: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((cell_strategy(), cell_strategy()), 0..max_rows).prop_map(|cells| {
        cells
            .into_iter()
            .enumerate()
            .map(|(i, (a, b))| {
                let mut record = Record::new().with("id", i as i64);
                if let Some(a) = a {
                    record.set("a", a);
                }
                if let Some(b) = b {
                    record.set("b", b as f64 / 2.0);
                }
                record
            })
            .collect()
    })
}

fn order_strategy() -> impl Strategy<Value = SortOrder> {
    prop_oneof![Just(SortOrder::Asc), Just(SortOrder::Desc)]
}

fn ids(records: &[Record]) -> Vec<i64> {
    records
        .iter()
        .filter_map(|r| match r.get("id") {
            Some(Value::Int(id)) => Some(*id),
            _ => None,
        })
        .collect()
}

/// Integer values of `field`, skipping records where it is null.
fn raw_keys(records: &[Record], field: &str) -> Vec<i64> {
    records
        .iter()
        .filter_map(|r| match r.get(field) {
            Some(Value::Int(v)) => Some(*v),
            _ => None,
        })
        .collect()
}

proptest! {
    /// Property: the comparator is antisymmetric and reflexive.
    #[test]
    fn comparator_is_antisymmetric(
        records in records_strategy(12),
        order in order_strategy(),
    ) {
        let criteria = [Criterion::new("a", order), Criterion::asc("b")];
        for x in &records {
            prop_assert_eq!(Comparator::compare(x, x, &criteria).unwrap(), Ordering::Equal);
            for y in &records {
                let xy = Comparator::compare(x, y, &criteria).unwrap();
                let yx = Comparator::compare(y, x, &criteria).unwrap();
                prop_assert_eq!(xy, yx.reverse());
            }
        }
    }

    /// Property: on non-null keys the comparator agrees with the raw integer order.
    #[test]
    fn comparator_matches_raw_values(x in -20i64..20, y in -20i64..20) {
        let a = Record::new().with("a", x);
        let b = Record::new().with("a", y);

        let asc = Comparator::compare(&a, &b, &[Criterion::asc("a")]).unwrap();
        prop_assert_eq!(asc, x.cmp(&y));

        let desc = Comparator::compare(&a, &b, &[Criterion::desc("a")]).unwrap();
        prop_assert_eq!(desc, y.cmp(&x));
    }

    /// Property: sorted raw keys are monotone in the requested direction.
    #[test]
    fn sorted_raw_keys_are_monotone(
        records in records_strategy(60),
        order in order_strategy(),
    ) {
        let sorted = QuickSorter::sort(&records, &[Criterion::new("a", order)]).unwrap();
        let keys = raw_keys(&sorted, "a");

        for pair in keys.windows(2) {
            match order {
                SortOrder::Asc => prop_assert!(pair[0] <= pair[1]),
                SortOrder::Desc => prop_assert!(pair[0] >= pair[1]),
            }
        }

        let non_null = records.iter().filter(|r| !r.is_null("a")).count();
        prop_assert_eq!(keys.len(), non_null);
        prop_assert!(sorted[..non_null].iter().all(|r| !r.is_null("a")));
    }

    /// Property: sorted output is a permutation of the input.
    #[test]
    fn sort_is_permutation(records in records_strategy(60), order in order_strategy()) {
        let sorted = QuickSorter::sort(&records, &[Criterion::new("a", order)]).unwrap();

        let mut before = ids(&records);
        let mut after = ids(&sorted);
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    /// Property: adjacent pairs are ordered and nulls form a suffix.
    #[test]
    fn sort_is_monotone_with_nulls_last(
        records in records_strategy(60),
        order in order_strategy(),
    ) {
        let criteria = [Criterion::new("a", order)];
        let sorted = QuickSorter::sort(&records, &criteria).unwrap();

        for pair in sorted.windows(2) {
            prop_assert_ne!(
                Comparator::compare(&pair[0], &pair[1], &criteria).unwrap(),
                Ordering::Greater
            );
        }

        let first_null = sorted.iter().position(|r| r.is_null("a")).unwrap_or(sorted.len());
        prop_assert!(sorted[first_null..].iter().all(|r| r.is_null("a")));
    }

    /// Property: the sort agrees with the standard library's stable sort.
    #[test]
    fn sort_matches_stable_reference(
        records in records_strategy(60),
        order in order_strategy(),
    ) {
        let criteria = [Criterion::new("a", order), Criterion::desc("b")];
        let sorted = QuickSorter::sort(&records, &criteria).unwrap();

        let mut reference = records.clone();
        reference.sort_by(|x, y| Comparator::compare(x, y, &criteria).unwrap());
        prop_assert_eq!(ids(&sorted), ids(&reference));
    }

    /// Property: sorting a sorted collection changes nothing.
    #[test]
    fn sort_is_idempotent(records in records_strategy(60)) {
        let criteria = [Criterion::desc("b"), Criterion::asc("a")];
        let once = QuickSorter::sort(&records, &criteria).unwrap();
        let twice = QuickSorter::sort(&once, &criteria).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property: the filter keeps exactly the records inside the range.
    #[test]
    fn filter_is_sound_and_complete(
        records in records_strategy(60),
        lo in -20i64..20,
        width in 0i64..20,
    ) {
        let hi = lo + width;
        let kept = RecordFilter::filter(&records, &[FilterSpec::range("a", lo, hi)]).unwrap();

        let expected: Vec<i64> = records
            .iter()
            .filter(|r| matches!(r.get("a"), Some(Value::Int(v)) if *v >= lo && *v <= hi))
            .map(|r| match r.get("id") {
                Some(Value::Int(id)) => *id,
                _ => -1,
            })
            .collect();
        prop_assert_eq!(ids(&kept), expected);
    }

    /// Property: filtering twice with the same specs changes nothing.
    #[test]
    fn filter_is_idempotent(records in records_strategy(60), bound in -20i64..20) {
        let specs = [FilterSpec::at_least("a", bound), FilterSpec::at_most("b", 5)];
        let once = RecordFilter::filter(&records, &specs).unwrap();
        let twice = RecordFilter::filter(&once, &specs).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property: groups partition the non-null records and preserve input order.
    #[test]
    fn grouping_partitions_non_null_records(records in records_strategy(60)) {
        let groups = Grouper::group_by_field(&records, "a").unwrap();

        let grouped: usize = groups.values().map(Vec::len).sum();
        let non_null = records.iter().filter(|r| !r.is_null("a")).count();
        prop_assert_eq!(grouped, non_null);

        for (key, members) in &groups {
            prop_assert!(members.iter().all(|r| GroupKey::new(r.value("a").clone()).as_ref() == Some(key)));
            let member_ids = ids(members);
            let mut sorted_ids = member_ids.clone();
            sorted_ids.sort_unstable();
            prop_assert_eq!(member_ids, sorted_ids);
        }
    }

    /// Property: constant fields never produce outliers.
    #[test]
    fn constant_field_has_no_outliers(
        value in -1000.0f64..1000.0,
        count in 1usize..40,
        threshold in 0.0f64..5.0,
    ) {
        let records: Vec<Record> = (0..count).map(|_| Record::new().with("fare", value)).collect();
        prop_assert!(OutlierDetector::detect(&records, "fare", threshold).unwrap().is_empty());
    }

    /// Property: every flagged record really exceeds the threshold.
    #[test]
    fn outliers_exceed_threshold(records in records_strategy(60), threshold in 0.0f64..3.0) {
        let anomalies = OutlierDetector::detect(&records, "a", threshold).unwrap();
        let stats = FieldStats::from_records(&records, "a").unwrap();

        for record in &anomalies {
            let value = record.get("a").and_then(Value::as_f64).unwrap();
            let z = stats.as_ref().and_then(|s| s.z_score(value)).unwrap();
            prop_assert!(z > threshold);
        }
    }

    /// Property: top-k is bounded by k and by the non-null count.
    #[test]
    fn top_k_is_bounded(records in records_strategy(60), k in 0usize..80) {
        let top = TopKSelector::select(&records, k, &Criterion::desc("a")).unwrap();
        let non_null = records.iter().filter(|r| !r.is_null("a")).count();
        prop_assert_eq!(top.len(), k.min(non_null));
    }

    /// Property: top-k equals the prefix of a full sort over non-null keys.
    #[test]
    fn top_k_is_sorted_prefix(
        records in records_strategy(60),
        k in 0usize..30,
        order in order_strategy(),
    ) {
        let criterion = Criterion::new("b", order);
        let top = TopKSelector::select(&records, k, &criterion).unwrap();

        let sorted = QuickSorter::sort(&records, std::slice::from_ref(&criterion)).unwrap();
        let expected: Vec<Record> = sorted
            .into_iter()
            .filter(|r| !r.is_null("b"))
            .take(k)
            .collect();
        prop_assert_eq!(ids(&top), ids(&expected));
    }
}
