//! Min-priority queue with in-place priority updates.
//!
//! Items are stored in a min-heap keyed by `(priority, insertion_order)`.
//! Lower priorities are dequeued first; ties are broken by insertion order
//! (FIFO), so the same sequence of operations always yields the same
//! dequeue order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<T> {
    item: T,
    priority: u32,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Natural order; the heap wraps entries in Reverse.
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue.
///
/// Duplicate priorities are kept; among equal priorities the entry enqueued
/// (or re-prioritised) earliest comes out first.
#[derive(Debug)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    seq: u64,
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        seq
    }

    /// Add an item at the given priority.
    pub fn enqueue(&mut self, item: T, priority: u32) {
        let seq = self.next_seq();
        self.heap.push(Reverse(Entry {
            item,
            priority,
            seq,
        }));
    }

    /// Remove and return the item with the lowest priority.
    pub fn dequeue(&mut self) -> Option<T> {
        self.heap.pop().map(|Reverse(entry)| entry.item)
    }

    /// Remove the item with the lowest priority, also returning the priority.
    pub fn dequeue_with_priority(&mut self) -> Option<(T, u32)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.item, entry.priority))
    }

    /// The lowest priority currently queued.
    pub fn peek_priority(&self) -> Option<u32> {
        self.heap.peek().map(|Reverse(entry)| entry.priority)
    }

    /// Move the first entry matching `item` (according to `eq`) to
    /// `priority`.
    ///
    /// The entry is treated as freshly enqueued for tie-breaking. Returns
    /// `false`, leaving the queue untouched, if nothing matched.
    pub fn update_priority(
        &mut self,
        item: &T,
        priority: u32,
        eq: impl Fn(&T, &T) -> bool,
    ) -> bool {
        let seq = self.next_seq();
        let mut entries = std::mem::take(&mut self.heap).into_vec();
        let found = match entries.iter_mut().find(|Reverse(e)| eq(&e.item, item)) {
            Some(Reverse(entry)) => {
                entry.priority = priority;
                entry.seq = seq;
                true
            }
            None => false,
        };
        self.heap = BinaryHeap::from(entries);
        found
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
