//! Fixed-capacity binary heap
//!
//! Keeps the `capacity` best items seen so far under a comparison where
//! `Less` means "better". The root is the worst retained item, so it is the
//! one evicted when a better candidate arrives. Flipping the comparison's
//! sign turns "keep the largest" into "keep the smallest".
//!
//! Array layout: children of `i` live at `2i + 1` and `2i + 2`.

use std::cmp::Ordering;

/// Bounded heap parameterized by a fallible comparison
pub struct BoundedHeap<T, C> {
    items: Vec<T>,
    capacity: usize,
    cmp: C,
}

impl<T, C> BoundedHeap<T, C> {
    /// Creates an empty heap holding at most `capacity` items
    pub fn with_capacity(capacity: usize, cmp: C) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            cmp,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Worst retained item, once the heap is full
    pub fn peek(&self) -> Option<&T> {
        if self.is_full() {
            self.items.first()
        } else {
            None
        }
    }

    /// Retained items in heap order
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T, C, E> BoundedHeap<T, C>
where
    C: FnMut(&T, &T) -> Result<Ordering, E>,
{
    /// Offers a candidate.
    ///
    /// Until the heap is full every candidate is kept; the heap property is
    /// established once, when the last free slot is taken. After that a
    /// candidate replaces the root only if it is strictly better.
    /// Returns whether the candidate was retained.
    pub fn offer(&mut self, item: T) -> Result<bool, E> {
        if self.capacity == 0 {
            return Ok(false);
        }

        if !self.is_full() {
            self.items.push(item);
            if self.is_full() {
                self.heapify()?;
            }
            return Ok(true);
        }

        if (self.cmp)(&item, &self.items[0])? == Ordering::Less {
            self.items[0] = item;
            self.sift_down(0)?;
            return Ok(true);
        }

        Ok(false)
    }

    fn heapify(&mut self) -> Result<(), E> {
        for i in (0..self.items.len() / 2).rev() {
            self.sift_down(i)?;
        }
        Ok(())
    }

    /// Moves the item at `index` down until no child is worse than it
    fn sift_down(&mut self, mut index: usize) -> Result<(), E> {
        let size = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut worst = index;

            if left < size && (self.cmp)(&self.items[left], &self.items[worst])? == Ordering::Greater {
                worst = left;
            }
            if right < size && (self.cmp)(&self.items[right], &self.items[worst])? == Ordering::Greater {
                worst = right;
            }

            if worst == index {
                return Ok(());
            }
            self.items.swap(index, worst);
            index = worst;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn largest(a: &i32, b: &i32) -> Result<Ordering, Infallible> {
        Ok(b.cmp(a))
    }

    fn smallest(a: &i32, b: &i32) -> Result<Ordering, Infallible> {
        Ok(a.cmp(b))
    }

    fn sorted(mut v: Vec<i32>) -> Vec<i32> {
        v.sort();
        v
    }

    #[test]
    fn test_keeps_k_largest() {
        let mut heap = BoundedHeap::with_capacity(3, largest);
        for v in [5, 1, 9, 3, 7, 2, 8] {
            heap.offer(v).unwrap();
        }
        assert_eq!(heap.peek(), Some(&7));
        assert_eq!(sorted(heap.into_vec()), vec![7, 8, 9]);
    }

    #[test]
    fn test_keeps_k_smallest() {
        let mut heap = BoundedHeap::with_capacity(3, smallest);
        for v in [5, 1, 9, 3, 7, 2, 8] {
            heap.offer(v).unwrap();
        }
        assert_eq!(heap.peek(), Some(&3));
        assert_eq!(sorted(heap.into_vec()), vec![1, 2, 3]);
    }

    #[test]
    fn test_equal_candidate_does_not_replace_root() {
        let mut heap = BoundedHeap::with_capacity(2, largest);
        heap.offer(4).unwrap();
        heap.offer(6).unwrap();
        assert!(!heap.offer(4).unwrap());
        assert!(heap.offer(5).unwrap());
        assert_eq!(sorted(heap.into_vec()), vec![5, 6]);
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let mut heap = BoundedHeap::with_capacity(0, largest);
        assert!(!heap.offer(1).unwrap());
        assert!(heap.is_empty());
        assert!(heap.is_full());
        assert_eq!(heap.peek(), None);
    }

    #[test]
    fn test_partial_fill() {
        let mut heap = BoundedHeap::with_capacity(5, largest);
        heap.offer(2).unwrap();
        heap.offer(1).unwrap();
        assert_eq!(heap.len(), 2);
        assert!(!heap.is_full());
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.capacity(), 5);
    }

    #[test]
    fn test_comparison_error_propagates() {
        let mut heap = BoundedHeap::with_capacity(1, |a: &i32, b: &i32| {
            if *a < 0 || *b < 0 {
                Err("negative")
            } else {
                Ok(b.cmp(a))
            }
        });
        heap.offer(1).unwrap();
        assert_eq!(heap.offer(-1), Err("negative"));
    }
}
