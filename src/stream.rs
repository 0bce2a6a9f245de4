//! Definition of a file like view over a [`Session`].

use crate::{Error, Interrupt, Session};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// A cursor over a [`Session`] that implements [`Read`], [`Write`] and [`Seek`].
///
/// Each stream tracks its own position in the content of the session, like an
/// open file description does. Reads start at that position and advance it,
/// writes always append to the session regardless of position.
///
/// * A read never returns bytes from more than one record, so keep reading
///   till end of stream to drain everything.
/// * A position beyond end of content, which can happen when records are evicted
///   after seeking, reads as end of stream.
#[derive(Debug)]
pub struct LogStream<'a> {
    session: &'a Session,
    interrupt: Option<&'a Interrupt>,
    position: u64,
}

impl<'a> LogStream<'a> {
    /// Create a new stream positioned at the start of content.
    ///
    /// # Arguments
    ///
    /// * `session` - Session to read from and write to.
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            interrupt: None,
            position: 0,
        }
    }

    /// Create a new stream that gives up waiting on the session lock when interrupted.
    ///
    /// Interrupted operations fail with [`io::ErrorKind::Interrupted`]. Note that
    /// helpers like [`Read::read_to_end`] retry on that kind of error, so reset
    /// or drop the handle rather than leaving it triggered while using them.
    ///
    /// # Arguments
    ///
    /// * `session` - Session to read from and write to.
    /// * `interrupt` - Handle to abandon waiting on the lock.
    pub fn with_interrupt(session: &'a Session, interrupt: &'a Interrupt) -> Self {
        Self {
            session,
            interrupt: Some(interrupt),
            position: 0,
        }
    }

    /// Current position of this stream.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl Read for LogStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = match self.interrupt {
            Some(interrupt) => self
                .session
                .read_into_interruptible(self.position, buf, interrupt),
            None => self.session.read_into(self.position, buf),
        };

        let len = match read {
            Ok(len) => len,
            Err(Error::NotFound { .. }) => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        self.position += len as u64;
        Ok(len)
    }
}

impl Write for LogStream<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = match self.interrupt {
            Some(interrupt) => self.session.append_interruptible(buf, interrupt)?,
            None => self.session.append(buf)?,
        };

        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(()) // Appends are visible as soon as they return.
    }
}

impl Seek for LogStream<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (base, delta) = match pos {
            SeekFrom::Start(position) => (position, 0),
            SeekFrom::Current(delta) => (self.position, delta),
            SeekFrom::End(delta) => (self.session.content_len() as u64, delta),
        };

        // Cannot seek before the start of content.
        let position = base.checked_add_signed(delta).ok_or_else(|| {
            Error::InvalidArgument(format!("Cannot seek {delta} bytes from position {base}"))
        })?;

        self.position = position;
        Ok(position)
    }
}
