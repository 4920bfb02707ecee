//! Core error types for cursorkit.
//!
//! Every cursor operation reports failure through [`Error`]. Operations that
//! may consume some units before failing (fixed-count reads and run scans)
//! report through [`Partial`], which carries whatever was consumed alongside
//! the error that stopped it.

use std::io;

/// Core cursorkit error type.
///
/// [`Error::EndOfStream`] is the normal termination signal and is always kept
/// distinct from the other variants, which indicate misuse, malformed input
/// or a misbehaving source.
///
/// # Example
///
/// ```ignore
/// use cursorkit::{ByteCursor, Error, UnitCursor};
///
/// let mut cursor = ByteCursor::new(b"a".as_slice());
/// assert_eq!(cursor.read().unwrap(), b'a');
/// assert!(matches!(cursor.read(), Err(Error::EndOfStream)));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No more units are available.
    #[error("end of stream")]
    EndOfStream,

    /// Retraction was requested with no unit left to retract.
    ///
    /// On streaming cursors this also covers units that have been compacted
    /// out of the buffer.
    #[error("already at the start of the stream")]
    AtStreamStart,

    /// The bytes at `offset` do not form a valid UTF-8 code point.
    #[error("invalid UTF-8 sequence at byte offset {offset}")]
    InvalidEncoding {
        /// Offset of the first byte of the offending sequence.
        offset: usize,
    },

    /// A named-set operation was attempted with no sets attached, or the
    /// attached sets have no entry for `name`.
    #[error("no character set named `{name}` is defined")]
    UndefinedSet {
        /// The requested set name.
        name: String,
    },

    /// A bookend was started while another one was active.
    #[error("a bookend is already active")]
    AlreadyActive,

    /// A bookend operation needs an active mark and there is none.
    #[error("no bookend is active")]
    NoActiveMark,

    /// The byte source broke its contract.
    #[error("byte source protocol violation: {reason}")]
    ProtocolViolation {
        /// What the source did wrong.
        reason: &'static str,
    },

    /// The byte source reported a fault.
    #[error("byte source failed: {0}")]
    Source(#[from] io::Error),
}

impl Error {
    /// Returns true for [`Error::EndOfStream`].
    #[inline]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::EndOfStream)
    }

    pub(crate) fn undefined_set(name: &str) -> Self {
        Error::UndefinedSet {
            name: name.to_owned(),
        }
    }
}

/// Result of an operation that collects units, keeping what was collected on
/// failure.
pub type RunResult<U> = Result<Vec<U>, Partial<Vec<U>>>;

/// Result of an operation that counts the units it wrote or skipped.
pub type CountResult = Result<usize, Partial<usize>>;

/// An error together with the partial result produced before it.
///
/// `P` is the partial value: the units collected so far (`Vec<U>`) for
/// collecting operations, or a count (`usize`) for fill and discard
/// operations.
///
/// # Example
///
/// ```ignore
/// let mut cursor = ByteCursor::new(vec![1, 2]);
/// let partial = cursor.read_count(3).unwrap_err();
/// assert_eq!(partial.value, vec![1, 2]);
/// assert!(partial.error.is_end_of_stream());
/// ```
#[derive(Debug, thiserror::Error)]
#[error("stopped after a partial result")]
pub struct Partial<P> {
    /// Whatever was consumed before the error.
    pub value: P,
    /// The error that stopped the operation.
    #[source]
    pub error: Error,
}

impl<P> Partial<P> {
    #[inline]
    pub fn new(value: P, error: Error) -> Self {
        Self { value, error }
    }

    /// Returns true if the operation stopped at end of stream.
    #[inline]
    pub fn is_end_of_stream(&self) -> bool {
        self.error.is_end_of_stream()
    }

    /// Replaces the partial value, keeping the error.
    #[inline]
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> Partial<Q> {
        Partial {
            value: f(self.value),
            error: self.error,
        }
    }

    /// Splits into the partial value and the error.
    #[inline]
    pub fn into_parts(self) -> (P, Error) {
        (self.value, self.error)
    }
}

impl<P> From<Partial<P>> for Error {
    #[inline]
    fn from(partial: Partial<P>) -> Self {
        partial.error
    }
}
