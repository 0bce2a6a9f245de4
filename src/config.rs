//! Definition of configuration for a [`Session`](crate::Session).

use crate::{Error, Result};

/// Default number of records retained by a session.
pub const DEFAULT_CAPACITY: usize = 10;

/// Default byte that marks end of a record.
pub const DEFAULT_DELIMITER: u8 = b'\n';

/// Configuration fixed at the time a session is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of records retained.
    capacity: usize,
    /// Byte that marks end of a record.
    delimiter: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl Config {
    /// Set maximum number of records retained, must be > 0.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set byte that marks end of a record.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Maximum number of records retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Byte that marks end of a record.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Make sure configuration can be used to build a session.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidArgument(
                "Capacity must hold at least 1 record".into(),
            ));
        }

        Ok(())
    }
}
