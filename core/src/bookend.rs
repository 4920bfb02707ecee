//! Bookend marks.
//!
//! A bookend remembers one cursor position so the units consumed after it
//! can be extracted later. See
//! [`UnitCursor::start_bookend`](crate::UnitCursor::start_bookend).

use crate::Error;

/// The optional mark of a single cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bookend {
    mark: Option<usize>,
}

impl Bookend {
    #[inline]
    pub const fn new() -> Self {
        Self { mark: None }
    }

    /// The marked position, if a bookend is active.
    #[inline]
    pub const fn mark(&self) -> Option<usize> {
        self.mark
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        self.mark.is_some()
    }

    /// Marks `position`. Fails with [`Error::AlreadyActive`] if a mark exists.
    pub fn start(&mut self, position: usize) -> Result<(), Error> {
        if self.mark.is_some() {
            return Err(Error::AlreadyActive);
        }
        tracing::trace!(position, "bookend started");
        self.mark = Some(position);
        Ok(())
    }

    /// Clears the mark, returning it.
    pub fn clear(&mut self) -> Option<usize> {
        let mark = self.mark.take();
        if let Some(position) = mark {
            tracing::trace!(position, "bookend stopped");
        }
        mark
    }
}
