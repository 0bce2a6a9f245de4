//! Definition of a session that serializes access to a ring buffer of records.

use crate::{Assembler, Config, Error, RecordRing, Result};
use parking_lot::{Mutex, MutexGuard};
use std::{
    cmp::min,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tracing::{debug, trace};

/// How often a blocked caller checks its [`Interrupt`] while waiting on the lock.
pub const INTERRUPT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Handle to abandon waiting on a [`Session`] lock.
///
/// Clones share the same flag, so one clone can be handed to whoever needs to
/// cancel while another is passed to the waiting call.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    /// Create a new handle that has not been triggered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every call waiting with this handle to give up.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Allow this handle to be reused after being triggered.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// true if this handle has been triggered, false otherwise.
    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Point in time view of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of records retained.
    pub records: usize,
    /// Number of bytes across all retained records.
    pub content_len: usize,
    /// Number of bytes waiting on a delimiter.
    pub pending_len: usize,
    /// Maximum number of records retained.
    pub capacity: usize,
    /// Number of records evicted since session was created.
    pub evictions: u64,
}

/// State guarded by the session lock.
#[derive(Debug)]
struct State {
    ring: RecordRing,
    assembler: Assembler,
    evictions: u64,
}

impl State {
    fn append(&mut self, chunk: &[u8]) -> Result<usize> {
        // Nothing is committed unless every record could be assembled.
        let records = self.assembler.feed(chunk)?;

        for record in records {
            let len = record.len();
            if let Some(evicted) = self.ring.insert(record) {
                self.evictions += 1;
                trace!(evicted_len = evicted.len(), "Evicted oldest record");

                // Release memory of the evicted record right away.
                drop(evicted);
            }

            trace!(len, records = self.ring.len(), "Committed record");
        }

        Ok(chunk.len())
    }

    /// Bytes readable with a single read starting at an offset.
    ///
    /// Never crosses a record boundary. Empty when offset is exactly at end of
    /// content.
    fn slice_from(&self, offset: u64, max_len: usize) -> Result<&[u8]> {
        if offset == self.ring.content_len() as u64 {
            return Ok(&[]);
        }

        let (record, local) = self.ring.resolve_offset(offset)?;
        let bytes = &record[local..];
        Ok(&bytes[..min(max_len, bytes.len())])
    }

    fn contents(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(self.ring.content_len())?;

        for record in self.ring.iter() {
            bytes.extend_from_slice(record);
        }

        Ok(bytes)
    }

    fn stats(&self) -> Stats {
        Stats {
            records: self.ring.len(),
            content_len: self.ring.content_len(),
            pending_len: self.assembler.pending().len(),
            capacity: self.ring.capacity(),
            evictions: self.evictions,
        }
    }
}

/// A log of records shared between any number of readers and writers.
///
/// Writers append chunks of bytes, which are assembled into records when a
/// delimiter shows up. Readers read from the concatenation of all retained
/// records by offset. Once capacity is reached, oldest records are evicted
/// to make space for new ones.
///
/// Every operation holds a single lock for its whole duration, so operations
/// are applied one after the other in the order the lock is acquired.
#[derive(Debug)]
pub struct Session {
    config: Config,
    state: Mutex<State>,
}

impl Session {
    /// Create a new instance of [`Session`].
    ///
    /// Returns [`Error::InvalidArgument`] if configuration is not valid.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the session.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let state = State {
            ring: RecordRing::with_capacity(config.capacity()),
            assembler: Assembler::new(config.delimiter()),
            evictions: 0,
        };

        debug!(
            capacity = config.capacity(),
            delimiter = config.delimiter(),
            "Created session"
        );

        Ok(Self {
            config,
            state: Mutex::new(state),
        })
    }

    /// Maximum number of records retained.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    /// Byte that marks end of a record.
    #[inline]
    pub fn delimiter(&self) -> u8 {
        self.config.delimiter()
    }

    /// Append a chunk of bytes.
    ///
    /// Every record completed by this chunk is committed in order, evicting
    /// oldest records if needed. Returns number of bytes accepted, which is
    /// always the length of the chunk.
    ///
    /// # Arguments
    ///
    /// * `chunk` - Bytes to append.
    pub fn append(&self, chunk: &[u8]) -> Result<usize> {
        self.state.lock().append(chunk)
    }

    /// Same as [`Session::append`], but gives up waiting on the lock when
    /// interrupted. Returns [`Error::Interrupted`] in that case, without
    /// having changed anything.
    ///
    /// # Arguments
    ///
    /// * `chunk` - Bytes to append.
    /// * `interrupt` - Handle to abandon waiting on the lock.
    pub fn append_interruptible(&self, chunk: &[u8], interrupt: &Interrupt) -> Result<usize> {
        self.lock_interruptible(interrupt)?.append(chunk)
    }

    /// Read bytes starting from a global offset.
    ///
    /// * Returns at most `max_len` bytes.
    /// * Bytes returned never span more than one record. Read again from
    ///   `offset + bytes.len()` to continue into the next record.
    /// * Returns no bytes if offset is exactly at end of content.
    /// * Returns [`Error::NotFound`] if offset is beyond end of content.
    ///
    /// # Arguments
    ///
    /// * `offset` - Global offset of the first byte to read.
    /// * `max_len` - Maximum number of bytes to read.
    pub fn read_from(&self, offset: u64, max_len: usize) -> Result<Vec<u8>> {
        let state = self.state.lock();
        Self::copy_out(&state, offset, max_len)
    }

    /// Same as [`Session::read_from`], but gives up waiting on the lock when
    /// interrupted. Returns [`Error::Interrupted`] in that case.
    ///
    /// # Arguments
    ///
    /// * `offset` - Global offset of the first byte to read.
    /// * `max_len` - Maximum number of bytes to read.
    /// * `interrupt` - Handle to abandon waiting on the lock.
    pub fn read_from_interruptible(
        &self,
        offset: u64,
        max_len: usize,
        interrupt: &Interrupt,
    ) -> Result<Vec<u8>> {
        let state = self.lock_interruptible(interrupt)?;
        Self::copy_out(&state, offset, max_len)
    }

    /// Read bytes starting from a global offset into a buffer.
    ///
    /// Same as [`Session::read_from`] with `max_len` of `buf.len()`, but
    /// copies into the caller's buffer. Returns number of bytes copied.
    ///
    /// # Arguments
    ///
    /// * `offset` - Global offset of the first byte to read.
    /// * `buf` - Buffer to copy bytes into.
    pub fn read_into(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let state = self.state.lock();
        Self::copy_into(&state, offset, buf)
    }

    /// Same as [`Session::read_into`], but gives up waiting on the lock when
    /// interrupted.
    ///
    /// # Arguments
    ///
    /// * `offset` - Global offset of the first byte to read.
    /// * `buf` - Buffer to copy bytes into.
    /// * `interrupt` - Handle to abandon waiting on the lock.
    pub fn read_into_interruptible(
        &self,
        offset: u64,
        buf: &mut [u8],
        interrupt: &Interrupt,
    ) -> Result<usize> {
        let state = self.lock_interruptible(interrupt)?;
        Self::copy_into(&state, offset, buf)
    }

    /// Copy of all retained records, oldest first.
    pub fn contents(&self) -> Result<Vec<u8>> {
        self.state.lock().contents()
    }

    /// Number of bytes across all retained records.
    pub fn content_len(&self) -> usize {
        self.state.lock().ring.content_len()
    }

    /// Point in time view of this session.
    pub fn stats(&self) -> Stats {
        self.state.lock().stats()
    }

    /// Drop all retained records and pending bytes.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.ring.clear();
        state.assembler.clear();
        debug!("Cleared session");
    }

    /// Acquire the session lock, checking for interrupts while waiting.
    fn lock_interruptible(&self, interrupt: &Interrupt) -> Result<MutexGuard<'_, State>> {
        loop {
            if interrupt.is_triggered() {
                debug!("Interrupted while waiting for session lock");
                return Err(Error::Interrupted);
            }

            if let Some(guard) = self.state.try_lock_for(INTERRUPT_POLL_INTERVAL) {
                return Ok(guard);
            }
        }
    }

    fn copy_out(state: &State, offset: u64, max_len: usize) -> Result<Vec<u8>> {
        let src = state.slice_from(offset, max_len)?;

        let mut bytes = Vec::new();
        bytes.try_reserve_exact(src.len())?;
        bytes.extend_from_slice(src);
        Ok(bytes)
    }

    fn copy_into(state: &State, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let src = state.slice_from(offset, buf.len())?;
        buf[..src.len()].copy_from_slice(src);
        Ok(src.len())
    }
}
