//! Definition of a ring buffer of records.

use crate::{Error, Record, Result};

/// Index of a slot in a [`RecordRing`].
///
/// Always lies in `[0, capacity)`, wrapping around to 0 when advanced past
/// the last slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotIndex {
    value: usize,
    capacity: usize,
}

impl SlotIndex {
    fn new(capacity: usize) -> Self {
        Self { value: 0, capacity }
    }

    #[inline]
    fn get(self) -> usize {
        self.value
    }

    #[inline]
    fn advance(&mut self) {
        self.value += 1;
        if self.value == self.capacity {
            self.value = 0;
        }
    }

    #[inline]
    fn reset(&mut self) {
        self.value = 0;
    }
}

/// RecordRing is a fixed size ring buffer of variable length [`Record`]s.
///
/// Works pretty much like any other ring buffer, few differences:
/// * Capacity is measured in records, not bytes.
/// * Evicted records are handed back to the caller rather than dropped in place.
/// * Bytes can be addressed by their offset in the concatenation of all retained records.
///
/// No locking is performed here, callers must serialize access.
#[derive(Debug)]
pub struct RecordRing {
    // Index where the next insert will occur.
    head: SlotIndex,

    // Index of the oldest record in the ring buffer.
    tail: SlotIndex,

    // Number of records currently held in the ring buffer.
    length: usize,

    // Sum of lengths of all records currently held in the ring buffer.
    bytes: usize,

    // Pre-allocated slots for ring buffer records.
    slots: Vec<Option<Record>>,
}

impl RecordRing {
    /// Create a new instance of this ring buffer.
    ///
    /// Memory for slots is allocated during initialization. Memory for records
    /// is owned by the records themselves.
    ///
    /// # Panic
    ///
    /// * Ring buffer must have at least one slot.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of records this ring buffer can hold.
    #[track_caller]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be > 0");

        Self {
            head: SlotIndex::new(capacity),
            tail: SlotIndex::new(capacity),
            length: 0,
            bytes: 0,
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
        }
    }

    /// Maximum number of records this ring buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of records currently held in this ring buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// true if this ring buffer has no records, false otherwise.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// true if the next insert will evict a record, false otherwise.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.length == self.slots.len()
    }

    /// Total number of bytes across all records currently held.
    #[inline]
    pub fn content_len(&self) -> usize {
        self.bytes
    }

    /// Insert a record into this ring buffer.
    ///
    /// If the ring buffer is full, the oldest record is evicted to make space
    /// for the new one. Ownership of the evicted record is returned to the
    /// caller, dropping it releases its memory.
    ///
    /// # Arguments
    ///
    /// * `record` - Record to insert.
    pub fn insert(&mut self, record: Record) -> Option<Record> {
        // Reclaim space from the oldest record when at capacity.
        let evicted = if self.is_full() {
            let evicted = self.slots[self.tail.get()].take();
            self.tail.advance();
            evicted
        } else {
            self.length += 1;
            None
        };

        if let Some(evicted) = &evicted {
            self.bytes -= evicted.len();
        }

        // New record always lands where head was pointing.
        self.bytes += record.len();
        self.slots[self.head.get()] = Some(record);
        self.head.advance();

        evicted
    }

    /// Find the record holding a byte at a global offset.
    ///
    /// Global offset is the position of a byte in the concatenation of all
    /// records in this ring buffer, oldest first. Returns the record and the
    /// offset of that byte within the record.
    ///
    /// Returns [`Error::NotFound`] if offset is at or beyond content length,
    /// which is always the case when ring buffer is empty.
    ///
    /// # Arguments
    ///
    /// * `offset` - Global offset of the byte to find.
    pub fn resolve_offset(&self, offset: u64) -> Result<(&Record, usize)> {
        let not_found = || Error::NotFound {
            offset,
            len: self.bytes,
        };

        // Offsets that do not fit in memory can never be retained.
        let offset = usize::try_from(offset).map_err(|_| not_found())?;
        if offset >= self.bytes {
            return Err(not_found());
        }

        let mut start = 0;
        for record in self.iter() {
            let end = start + record.len();
            if offset < end {
                return Ok((record, offset - start));
            }

            start = end;
        }

        // Cached content length guarantees some record holds the offset.
        Err(not_found())
    }

    /// An iterator over records currently in ring buffer, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        let tail = self.tail.get();

        // Records from tail till end of slots, then wrapped around to the start.
        let (wrapped, first) = self.slots.split_at(tail);
        first
            .iter()
            .chain(wrapped.iter())
            .take(self.length)
            .flatten()
    }

    /// Remove all records from this ring buffer, releasing their memory.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head.reset();
        self.tail.reset();
        self.length = 0;
        self.bytes = 0;
    }
}
