//! A worker's bounded FIFO of solution-space BCBs waiting to be explored.
//!
//! Grounded on `original_source/MPI/include/common.h`'s `Queue` (a fixed
//! `SOLUTION_SPACES`-sized ring buffer of BCBs).

use std::collections::VecDeque;

use crate::bcb::Bcb;

/// A FIFO of [`Bcb`]s, bounded at construction time.
#[derive(Debug)]
pub struct Queue {
    items: VecDeque<Bcb>,
    capacity: usize,
}

impl Queue {
    pub fn new(capacity: usize) -> Self {
        Queue { items: VecDeque::with_capacity(capacity), capacity }
    }

    /// Pushes `bcb` to the back of the queue. Returns `false` (and drops
    /// nothing — the caller keeps ownership) if the queue is already at
    /// capacity.
    pub fn push(&mut self, bcb: Bcb) -> bool {
        if self.items.len() >= self.capacity {
            return false;
        }
        self.items.push_back(bcb);
        true
    }

    pub fn pop_front(&mut self) -> Option<Bcb> {
        self.items.pop_front()
    }

    /// Removes and returns the BCB from the back of the queue: the unit of
    /// work handed to another worker when splitting, so the donor keeps
    /// working on the front of its own queue uninterrupted.
    pub fn pop_back(&mut self) -> Option<Bcb> {
        self.items.pop_back()
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SolutionGrid;
    use crate::unknowns::UnknownIndex;

    fn dummy_bcb() -> Bcb {
        let board = SolutionGrid::unknown(2);
        let unknowns = UnknownIndex::compute(&board);
        Bcb::new(board, &unknowns)
    }

    #[test]
    fn respects_capacity() {
        let mut q = Queue::new(1);
        assert!(q.push(dummy_bcb()));
        assert!(!q.push(dummy_bcb()));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn fifo_order_on_pop_front() {
        let mut q = Queue::new(4);
        for _ in 0..3 {
            q.push(dummy_bcb());
        }
        assert_eq!(q.len(), 3);
        q.pop_front();
        assert_eq!(q.len(), 2);
    }
}
