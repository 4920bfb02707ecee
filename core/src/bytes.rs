//! Fixed in-memory byte cursor.

use std::sync::Arc;

use crate::error::Error;
use crate::traits::{CursorState, UnitCursor};

/// A cursor over a fixed byte buffer.
///
/// The buffer is never modified. Reads past the end fail with
/// [`Error::EndOfStream`]; retraction can always reach the first byte.
#[derive(Debug, Clone)]
pub struct ByteCursor {
    bytes: Arc<[u8]>,
    pos: usize,
    state: CursorState<u8>,
}

impl ByteCursor {
    /// Creates a cursor over `bytes`, positioned on the first byte.
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
            pos: 0,
            state: CursorState::new(),
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes not yet read.
    #[inline]
    pub fn remaining(&self) -> &[u8] {
        &self.bytes[self.pos..]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl UnitCursor for ByteCursor {
    type Unit = u8;

    #[inline]
    fn read(&mut self) -> Result<u8, Error> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }

    #[inline]
    fn unread(&mut self) -> Result<(), Error> {
        if self.pos == 0 {
            return Err(Error::AtStreamStart);
        }
        self.pos -= 1;
        Ok(())
    }

    #[inline]
    fn peek(&mut self) -> Result<u8, Error> {
        self.bytes.get(self.pos).copied().ok_or(Error::EndOfStream)
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn units_between(&self, start: usize, end: usize) -> Result<Vec<u8>, Error> {
        Ok(self
            .bytes
            .get(start..end.min(self.bytes.len()))
            .map(<[u8]>::to_vec)
            .unwrap_or_default())
    }

    #[inline]
    fn state(&self) -> &CursorState<u8> {
        &self.state
    }

    #[inline]
    fn state_mut(&mut self) -> &mut CursorState<u8> {
        &mut self.state
    }
}
