//! Fixed cursor over already-decoded code points.

use std::sync::Arc;

use crate::error::Error;
use crate::traits::{CursorState, UnitCursor};

/// A cursor over a fixed buffer of code points.
///
/// Positions are element indices. Decoding cannot fail here, so the only
/// errors are [`Error::EndOfStream`] and [`Error::AtStreamStart`].
#[derive(Debug, Clone)]
pub struct CharCursor {
    chars: Arc<[char]>,
    pos: usize,
    state: CursorState<char>,
}

impl CharCursor {
    pub fn new(chars: impl Into<Arc<[char]>>) -> Self {
        Self {
            chars: chars.into(),
            pos: 0,
            state: CursorState::new(),
        }
    }

    /// Decodes `text` up front.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.chars().collect::<Vec<_>>())
    }

    #[inline]
    pub fn as_chars(&self) -> &[char] {
        &self.chars
    }

    #[inline]
    pub fn remaining(&self) -> &[char] {
        &self.chars[self.pos..]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl UnitCursor for CharCursor {
    type Unit = char;

    #[inline]
    fn read(&mut self) -> Result<char, Error> {
        let ch = self.peek()?;
        self.pos += 1;
        Ok(ch)
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
    fn peek(&mut self) -> Result<char, Error> {
        self.chars.get(self.pos).copied().ok_or(Error::EndOfStream)
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn units_between(&self, start: usize, end: usize) -> Result<Vec<char>, Error> {
        Ok(self
            .chars
            .get(start..end.min(self.chars.len()))
            .map(<[char]>::to_vec)
            .unwrap_or_default())
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

impl From<&str> for CharCursor {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_element_indices() {
        let mut cursor = CharCursor::from_text("∀x");
        assert_eq!(cursor.read().unwrap(), '∀');
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.units_between(0, 1).unwrap(), vec!['∀']);
        assert_eq!(cursor.remaining(), ['x']);
    }
}
