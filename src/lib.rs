//! # Linering
//!
//! Linering is a bounded, in-memory log of records that is read and written like a stream of bytes.
//!
//! ## Record
//!
//! A [`Record`] is a complete sequence of bytes terminated by a delimiter (newline by default).
//! Writers append arbitrary chunks of bytes. An [`Assembler`] buffers those chunks till a delimiter
//! shows up, and then hands complete records to a [`RecordRing`].
//!
//! ## Ring
//!
//! A [`RecordRing`] holds a fixed number of records. Once full, the oldest record is evicted to
//! make space for a new one. Readers address bytes by their offset in the concatenation of all
//! records currently in the ring.
//!
//! ## Session
//!
//! A [`Session`] ties an assembler and a ring buffer together behind a single lock, so that it can
//! be shared between any number of threads. [`LogStream`] exposes a session through [`std::io`]
//! traits.
//!
//! ```
//! use linering::{Config, Session};
//!
//! let session = Session::new(Config::default().with_capacity(2)).unwrap();
//! session.append(b"AA\nBB\n").unwrap();
//! session.append(b"CC\n").unwrap();
//!
//! // Oldest record was evicted, reads never cross a record boundary.
//! assert_eq!(session.read_from(0, 6).unwrap(), b"BB\n");
//! assert_eq!(session.read_from(3, 6).unwrap(), b"CC\n");
//! ```

pub(crate) mod assembler;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod record;
pub(crate) mod ring;
pub(crate) mod session;
pub(crate) mod stream;

#[cfg(test)]
pub(crate) mod oracle;

// Externally exposed types.
pub use assembler::Assembler;
pub use config::{Config, DEFAULT_CAPACITY, DEFAULT_DELIMITER};
pub use error::{Error, Result};
pub use record::Record;
pub use ring::RecordRing;
pub use session::{INTERRUPT_POLL_INTERVAL, Interrupt, Session, Stats};
pub use stream::LogStream;
