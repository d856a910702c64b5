use glam::IVec2;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::point::GridPoint;

/// A MinHeap for pathfinding that can store positions with a cost, either floats
/// or ints.
///
/// Entries with equal cost are popped in the order they were pushed, so runs
/// over the same grid always expand nodes in the same order.
///
/// # Example
/// ```rust
/// use grid_pathfinding::MinHeap;
/// let mut heap = MinHeap::new();
/// heap.push([10,10], 5.0);
/// heap.push([3,3], 5.0);
/// heap.push([1,1], 2.0);
///
/// assert_eq!([1,1], heap.pop().unwrap().to_array());
/// assert_eq!([10,10], heap.pop().unwrap().to_array());
///
/// let mut heap = MinHeap::new();
/// heap.push([10,10], 5);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MinHeap<T: Cost = f64> {
    heap: BinaryHeap<Cell<T::Wrapped>>,
    seq: u64,
}

impl<T: Cost> MinHeap<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            seq: 0,
        }
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }

    pub fn push(&mut self, xy: impl GridPoint, cost: T) {
        self.heap.push(Cell {
            cost: cost.wrap(),
            seq: self.seq,
            pos: xy.to_ivec2(),
        });
        self.seq += 1;
    }

    pub fn pop(&mut self) -> Option<IVec2> {
        self.heap.pop().map(|c| c.pos)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// A cell for our min heap.
#[derive(Eq, PartialEq, Debug, Default, Clone, Copy)]
struct Cell<T> {
    cost: T,
    seq: u64,
    pos: IVec2,
}

impl<T: Ord> Ord for Cell<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // lowest cost first, then oldest insertion. Sequence numbers are
        // unique so the position never decides.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T: Ord> PartialOrd for Cell<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Wrapper to allow the usage of floats or ints as costs in the MinHeap.
pub trait Cost: Sized {
    type Wrapped: Ord + std::fmt::Debug + Clone;
    fn wrap(self) -> Self::Wrapped;
}

impl Cost for i32 {
    type Wrapped = i32;

    fn wrap(self) -> Self::Wrapped {
        self
    }
}

impl Cost for f32 {
    type Wrapped = OrderedFloat<f32>;

    fn wrap(self) -> Self::Wrapped {
        OrderedFloat(self)
    }
}

impl Cost for f64 {
    type Wrapped = OrderedFloat<f64>;

    fn wrap(self) -> Self::Wrapped {
        OrderedFloat(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floatheap() {
        let mut floatheap = MinHeap::new();
        floatheap.push([2, 2], 2.0);
        floatheap.push([-10, -10], -10.0);
        floatheap.push([1, 1], 1.0);
        floatheap.push([5, 5], 5.0);

        assert_eq!([-10, -10], floatheap.pop().unwrap().to_array());
        assert_eq!([1, 1], floatheap.pop().unwrap().to_array());
        assert_eq!([2, 2], floatheap.pop().unwrap().to_array());
        assert_eq!([5, 5], floatheap.pop().unwrap().to_array());
        assert!(floatheap.pop().is_none());
    }

    #[test]
    fn intheap() {
        let mut intheap = MinHeap::new();
        intheap.push([2, 2], 2);
        intheap.push([-10, -10], -10);
        intheap.push([1, 1], 1);
        intheap.push([5, 5], 5);

        assert_eq!([-10, -10], intheap.pop().unwrap().to_array());
        assert_eq!([1, 1], intheap.pop().unwrap().to_array());
        assert_eq!([2, 2], intheap.pop().unwrap().to_array());
        assert_eq!([5, 5], intheap.pop().unwrap().to_array());
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut heap = MinHeap::new();
        heap.push([9, 9], 1.0);
        heap.push([0, 0], 1.0);
        heap.push([5, 1], 1.0);
        heap.push([4, 4], 0.5);

        assert_eq!([4, 4], heap.pop().unwrap().to_array());
        assert_eq!([9, 9], heap.pop().unwrap().to_array());
        assert_eq!([0, 0], heap.pop().unwrap().to_array());
        assert_eq!([5, 1], heap.pop().unwrap().to_array());
    }

    #[test]
    fn clear_resets() {
        let mut heap: MinHeap<f64> = MinHeap::with_capacity(4);
        heap.push([1, 1], 3.0);
        heap.push([2, 2], 1.0);
        assert_eq!(2, heap.len());
        heap.clear();
        assert!(heap.is_empty());
    }
}
