//! Top-K selection by a single criterion
//!
//! Records whose key is null never compete. When K covers every remaining
//! record the selection is a plain sort; otherwise a bounded heap of size K
//! streams over the candidates and its contents are sorted at the end.

use std::slice;

use super::heap::BoundedHeap;
use super::sorter::{QuickSorter, Ranked};
use crate::errors::EngineResult;
use crate::query::Criterion;
use crate::record::Record;

/// Selects the K best records
pub struct TopKSelector;

impl TopKSelector {
    /// Returns the first `k` records of the criterion's order.
    ///
    /// For `desc` these are the K largest values, for `asc` the K smallest.
    /// Ties are resolved in favour of the record that came first in the input.
    pub fn select(records: &[Record], k: usize, criterion: &Criterion) -> EngineResult<Vec<Record>> {
        criterion.validate()?;
        let criteria = slice::from_ref(criterion);

        let mut candidates: Vec<Ranked<'_>> = Ranked::rank(records)
            .into_iter()
            .filter(|entry| !entry.record.is_null(&criterion.field))
            .collect();

        if k >= candidates.len() {
            QuickSorter::sort_ranked(&mut candidates, criteria)?;
            return Ok(Self::materialize(candidates));
        }

        let mut heap = BoundedHeap::with_capacity(k, |a: &Ranked<'_>, b: &Ranked<'_>| {
            a.compare(b, criteria)
        });
        for entry in candidates {
            heap.offer(entry)?;
        }

        let mut selected = heap.into_vec();
        QuickSorter::sort_ranked(&mut selected, criteria)?;
        Ok(Self::materialize(selected))
    }

    fn materialize(entries: Vec<Ranked<'_>>) -> Vec<Record> {
        entries.into_iter().map(|e| e.record.clone()).collect()
    }
}
