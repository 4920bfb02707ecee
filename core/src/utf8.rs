//! UTF-8 decoding helpers and the fixed UTF-8 text cursor.
//!
//! Decoding goes through [`std::str::from_utf8`] on a window of at most
//! [`MAX_UTF8_WIDTH`] bytes, so a truncated sequence at the end of a buffer
//! is told apart from a malformed one. The streaming cursor relies on that
//! distinction to refill before giving up.

use std::sync::Arc;

use crate::config::CursorConfig;
use crate::error::Error;
use crate::history::WidthHistory;
use crate::traits::{CursorState, UnitCursor};

/// Longest encoded code point, in bytes.
pub(crate) const MAX_UTF8_WIDTH: usize = 4;

/// Outcome of decoding the code point at the front of a byte slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decoded {
    /// A code point and its encoded width.
    Char(char, usize),
    /// The slice ends inside a sequence that could still be completed. Also
    /// returned for an empty slice.
    Incomplete,
    /// The leading bytes can never form a code point.
    Invalid,
}

fn first_char(text: &str) -> Decoded {
    match text.chars().next() {
        Some(ch) => Decoded::Char(ch, ch.len_utf8()),
        None => Decoded::Incomplete,
    }
}

pub(crate) fn decode_first(bytes: &[u8]) -> Decoded {
    let window = &bytes[..bytes.len().min(MAX_UTF8_WIDTH)];
    match std::str::from_utf8(window) {
        Ok(text) => first_char(text),
        Err(e) if e.valid_up_to() > 0 => match std::str::from_utf8(&window[..e.valid_up_to()]) {
            Ok(text) => first_char(text),
            Err(_) => Decoded::Invalid,
        },
        Err(e) => match e.error_len() {
            None => Decoded::Incomplete,
            Some(_) => Decoded::Invalid,
        },
    }
}

#[inline]
const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decodes the code point that ends exactly at the end of `bytes`.
///
/// Returns `None` for an empty slice or when the trailing bytes are not one
/// complete code point.
pub(crate) fn decode_last(bytes: &[u8]) -> Option<(char, usize)> {
    let floor = bytes.len().saturating_sub(MAX_UTF8_WIDTH);
    let start = (floor..bytes.len())
        .rev()
        .find(|&i| !is_continuation(bytes[i]))?;
    match decode_first(&bytes[start..]) {
        Decoded::Char(ch, width) if start + width == bytes.len() => Some((ch, width)),
        _ => None,
    }
}

/// A cursor over fixed UTF-8 text yielding code points.
///
/// Positions are byte offsets. The text may be malformed when built with
/// [`Utf8Cursor::from_bytes`]; reading a malformed sequence fails with
/// [`Error::InvalidEncoding`] and leaves the cursor on it.
///
/// # Example
///
/// ```ignore
/// let mut cursor = Utf8Cursor::new("a\u{2200}");
/// assert_eq!(cursor.read().unwrap(), 'a');
/// assert_eq!(cursor.read().unwrap(), '\u{2200}');
/// assert_eq!(cursor.position(), 4);
/// cursor.unread().unwrap();
/// assert_eq!(cursor.position(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Utf8Cursor {
    bytes: Arc<[u8]>,
    pos: usize,
    history: WidthHistory,
    state: CursorState<char>,
}

impl Utf8Cursor {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self::from_bytes(text.as_ref().as_bytes())
    }

    /// Creates a cursor over raw bytes that need not be valid UTF-8.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
            pos: 0,
            history: WidthHistory::new(CursorConfig::DEFAULT.history_capacity),
            state: CursorState::new(),
        }
    }

    /// Sets how many code point widths are remembered for `unread`.
    ///
    /// Retraction past the history still works by decoding backward.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = WidthHistory::new(capacity);
        self
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn decode_next(&self) -> Result<(char, usize), Error> {
        let rest = &self.bytes[self.pos..];
        if rest.is_empty() {
            return Err(Error::EndOfStream);
        }
        match decode_first(rest) {
            Decoded::Char(ch, width) => Ok((ch, width)),
            Decoded::Incomplete | Decoded::Invalid => {
                Err(Error::InvalidEncoding { offset: self.pos })
            }
        }
    }
}

impl UnitCursor for Utf8Cursor {
    type Unit = char;

    fn read(&mut self) -> Result<char, Error> {
        let (ch, width) = self.decode_next()?;
        self.pos += width;
        self.history.push(width);
        Ok(ch)
    }

    fn unread(&mut self) -> Result<(), Error> {
        if self.pos == 0 {
            return Err(Error::AtStreamStart);
        }
        let width = match self.history.pop() {
            Some(width) => width,
            None => match decode_last(&self.bytes[..self.pos]) {
                Some((_, width)) => width,
                None => return Err(Error::InvalidEncoding { offset: self.pos }),
            },
        };
        self.pos -= width;
        Ok(())
    }

    #[inline]
    fn peek(&mut self) -> Result<char, Error> {
        self.decode_next().map(|(ch, _)| ch)
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn units_between(&self, start: usize, end: usize) -> Result<Vec<char>, Error> {
        if start >= end {
            return Ok(Vec::new());
        }
        let span = self
            .bytes
            .get(start..end.min(self.bytes.len()))
            .unwrap_or_default();
        std::str::from_utf8(span)
            .map(|text| text.chars().collect())
            .map_err(|e| Error::InvalidEncoding {
                offset: start + e.valid_up_to(),
            })
    }

    #[inline]
    fn state(&self) -> &CursorState<char> {
        &self.state
    }

    #[inline]
    fn state_mut(&mut self) -> &mut CursorState<char> {
        &mut self.state
    }
}

impl From<&str> for Utf8Cursor {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
