//! Multi-criteria quicksort
//!
//! Lomuto partitioning on a caller-local working copy, driven by an explicit
//! work stack instead of recursion. The pivot is the last element of the
//! active range after a median-of-three swap. Every record carries its input
//! position as the final tie-break, so the order is total: the result is
//! stable and does not depend on pivot choice.

use std::cmp::Ordering;

use super::comparator::Comparator;
use crate::errors::EngineResult;
use crate::query::Criterion;
use crate::record::Record;

/// A borrowed record paired with its input position
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ranked<'a> {
    pub position: usize,
    pub record: &'a Record,
}

impl<'a> Ranked<'a> {
    /// Pairs every record with its position
    pub fn rank(records: &'a [Record]) -> Vec<Ranked<'a>> {
        records
            .iter()
            .enumerate()
            .map(|(position, record)| Ranked { position, record })
            .collect()
    }

    /// Criteria order, then input position
    pub fn compare(&self, other: &Ranked<'_>, criteria: &[Criterion]) -> EngineResult<Ordering> {
        Ok(Comparator::compare(self.record, other.record, criteria)?
            .then(self.position.cmp(&other.position)))
    }
}

/// Sorts record collections
pub struct QuickSorter;

impl QuickSorter {
    /// Returns a sorted copy of `records`; the input is untouched.
    pub fn sort(records: &[Record], criteria: &[Criterion]) -> EngineResult<Vec<Record>> {
        Comparator::validate(criteria)?;

        if records.len() <= 1 {
            return Ok(records.to_vec());
        }

        let mut entries = Ranked::rank(records);
        Self::sort_ranked(&mut entries, criteria)?;
        Ok(entries.into_iter().map(|e| e.record.clone()).collect())
    }

    /// Sorts ranked entries in place.
    ///
    /// Returns the peak number of pending ranges on the work stack.
    pub(crate) fn sort_ranked(
        entries: &mut [Ranked<'_>],
        criteria: &[Criterion],
    ) -> EngineResult<usize> {
        if entries.len() <= 1 {
            return Ok(0);
        }

        // Half-open ranges [lo, hi)
        let mut pending: Vec<(usize, usize)> = vec![(0, entries.len())];
        let mut peak = pending.len();

        while let Some((lo, hi)) = pending.pop() {
            if hi - lo <= 1 {
                continue;
            }

            Self::move_median_to_end(entries, lo, hi, criteria)?;
            let pivot = Self::partition(entries, lo, hi, criteria)?;

            let left = (lo, pivot);
            let right = (pivot + 1, hi);

            // Smaller range on top keeps the stack logarithmic
            if left.1 - left.0 > right.1 - right.0 {
                pending.push(left);
                pending.push(right);
            } else {
                pending.push(right);
                pending.push(left);
            }
            peak = peak.max(pending.len());
        }

        Ok(peak)
    }

    /// Lomuto partition of `[lo, hi)` around the element at `hi - 1`
    fn partition(
        entries: &mut [Ranked<'_>],
        lo: usize,
        hi: usize,
        criteria: &[Criterion],
    ) -> EngineResult<usize> {
        let pivot = hi - 1;
        let mut store = lo;

        for j in lo..pivot {
            if entries[j].compare(&entries[pivot], criteria)? != Ordering::Greater {
                entries.swap(store, j);
                store += 1;
            }
        }

        entries.swap(store, pivot);
        Ok(store)
    }

    /// Moves the median of first, middle and last into the pivot slot
    fn move_median_to_end(
        entries: &mut [Ranked<'_>],
        lo: usize,
        hi: usize,
        criteria: &[Criterion],
    ) -> EngineResult<()> {
        if hi - lo < 3 {
            return Ok(());
        }

        let last = hi - 1;
        let mid = lo + (hi - lo) / 2;

        if entries[mid].compare(&entries[lo], criteria)? == Ordering::Less {
            entries.swap(mid, lo);
        }
        if entries[last].compare(&entries[lo], criteria)? == Ordering::Less {
            entries.swap(last, lo);
        }
        if entries[last].compare(&entries[mid], criteria)? == Ordering::Less {
            entries.swap(last, mid);
        }

        entries.swap(mid, last);
        Ok(())
    }
}
