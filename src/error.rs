//! Definition of errors returned by the record store.

use std::{collections::TryReserveError, io};
use thiserror::Error;

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Different types of error that can happen when accessing a [`Session`](crate::Session).
///
/// Every error is scoped to the single call that returned it. State is never
/// left partially mutated, so callers are free to retry.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Offset {offset} is beyond retained content of {len} bytes")]
    NotFound { offset: u64, len: usize },

    #[error("Could not allocate memory: {0}")]
    ResourceExhausted(#[from] TryReserveError),

    #[error("Interrupted while waiting for the session lock")]
    Interrupted,
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        let kind = match &error {
            Error::InvalidArgument(_) => io::ErrorKind::InvalidInput,
            Error::NotFound { .. } => io::ErrorKind::NotFound,
            Error::ResourceExhausted(_) => io::ErrorKind::OutOfMemory,
            Error::Interrupted => io::ErrorKind::Interrupted,
        };

        io::Error::new(kind, error)
    }
}
