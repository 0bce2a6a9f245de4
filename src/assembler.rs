//! Definition of an assembler that turns a stream of byte chunks into records.

use crate::{Record, Result};

/// Accumulates chunks of bytes from a writer into complete [`Record`]s.
///
/// Bytes are buffered until a delimiter shows up. Every delimiter closes out a
/// record that holds everything written since the previous delimiter, including
/// the delimiter itself. Bytes after the last delimiter stay pending until a
/// later chunk completes them.
#[derive(Debug)]
pub struct Assembler {
    // Byte that marks end of a record.
    delimiter: u8,

    // Bytes written after the last delimiter, never contains a delimiter.
    pending: Vec<u8>,
}

impl Assembler {
    /// Create a new instance of [`Assembler`].
    ///
    /// # Arguments
    ///
    /// * `delimiter` - Byte that marks end of a record.
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            pending: Vec::new(),
        }
    }

    /// Byte that marks end of a record.
    #[inline]
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Bytes waiting on a delimiter to complete a record.
    #[inline]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Feed a chunk of bytes, returning records completed by it.
    ///
    /// * Records are returned in the order their delimiters appear.
    /// * A chunk without any delimiter produces no records.
    /// * An empty chunk is a no-op.
    ///
    /// All memory is allocated before any state changes. If an allocation fails
    /// an error is returned and the assembler is left exactly as it was.
    ///
    /// # Arguments
    ///
    /// * `chunk` - Bytes to append.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<Record>> {
        // Early return if there is nothing to feed.
        if chunk.is_empty() {
            return Ok(Vec::new());
        }

        // Every delimiter terminated segment becomes a record. Last segment
        // is a remainder only if the chunk does not end with a delimiter.
        let delimiter = self.delimiter;
        let mut segments = chunk.split_inclusive(|byte| *byte == delimiter);
        let remainder: &[u8] = match chunk.last() {
            Some(byte) if *byte == delimiter => &[],
            _ => segments.next_back().unwrap_or_default(),
        };

        // No delimiter in this chunk, just keep buffering.
        let Some(first) = segments.next() else {
            self.pending.try_reserve(remainder.len())?;
            self.pending.extend_from_slice(remainder);
            return Ok(Vec::new());
        };

        // First record completes whatever was pending.
        let count = chunk.iter().filter(|byte| **byte == delimiter).count();
        let mut records = Vec::new();
        records.try_reserve_exact(count)?;
        records.push(Record::try_concat(&[self.pending.as_slice(), first])?);

        for segment in segments {
            records.push(Record::try_concat(&[segment])?);
        }

        // Bytes after the last delimiter become the new pending buffer.
        let mut pending = Vec::new();
        pending.try_reserve(remainder.len())?;
        pending.extend_from_slice(remainder);
        self.pending = pending;

        Ok(records)
    }

    /// Discard any pending bytes.
    pub fn clear(&mut self) {
        self.pending = Vec::new();
    }
}
