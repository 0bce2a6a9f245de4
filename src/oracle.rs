//! Reference implementation of record retention using standard library primitives.

use crate::Record;
use std::collections::VecDeque;

/// A fixed size ring of records backed by [`VecDeque`].
pub(crate) struct Oracle {
    capacity: usize,
    deque: VecDeque<Record>,
}

impl Oracle {
    /// Create a new instance of this ring buffer.
    ///
    /// # Panic
    ///
    /// * Ring buffer must have at least one record.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of records this ring buffer can hold.
    #[track_caller]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be > 0");

        Self {
            capacity,
            deque: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a record, returning the oldest record if it had to be evicted.
    ///
    /// # Arguments
    ///
    /// * `record` - Record to append into this ring buffer.
    pub(crate) fn insert(&mut self, record: Record) -> Option<Record> {
        let evicted = if self.deque.len() == self.capacity {
            self.deque.pop_front()
        } else {
            None
        };

        self.deque.push_back(record);
        evicted
    }

    /// Concatenation of all retained records, oldest first.
    pub(crate) fn contents(&self) -> Vec<u8> {
        self.deque.iter().flat_map(|record| record.iter().copied()).collect()
    }

    /// An iterator to iterate through all the records currently in ring buffer.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Record> {
        self.deque.iter()
    }
}
