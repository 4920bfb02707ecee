use std::sync::Arc;

use super::unit::Unit;
use crate::bookend::Bookend;
use crate::error::{CountResult, Error, Partial, RunResult};
use crate::matcher::{self, with_named_set};
use crate::sets::NamedSets;

/// State every cursor carries besides its position: the attached sets and
/// the bookend mark.
#[derive(Debug, Clone)]
pub struct CursorState<U: Unit> {
    sets: Option<Arc<NamedSets<U>>>,
    bookend: Bookend,
}

impl<U: Unit> CursorState<U> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            sets: None,
            bookend: Bookend::new(),
        }
    }

    /// The attached named sets, if any.
    #[inline]
    pub fn sets(&self) -> Option<&Arc<NamedSets<U>>> {
        self.sets.as_ref()
    }

    /// The bookend mark.
    #[inline]
    pub fn bookend(&self) -> &Bookend {
        &self.bookend
    }

    #[inline]
    pub(crate) fn bookend_mut(&mut self) -> &mut Bookend {
        &mut self.bookend
    }

    pub(crate) fn attach(&mut self, sets: Arc<NamedSets<U>>) -> Option<Arc<NamedSets<U>>> {
        tracing::trace!(sets = sets.len(), "attached named sets");
        self.sets.replace(sets)
    }

    pub(crate) fn detach(&mut self) -> Option<Arc<NamedSets<U>>> {
        self.sets.take()
    }
}

impl<U: Unit> Default for CursorState<U> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sequential cursor over bytes or code points.
///
/// Implementors supply reading, retraction and span extraction; lookahead,
/// fixed-count reads, named-set runs and bookends are provided on top.
///
/// # Position
///
/// [`position`](UnitCursor::position) is the offset of the next unit to be
/// read in the backing's own indexing: byte offsets for byte and UTF-8
/// backings, element indices for [`CharCursor`](crate::CharCursor).
/// Streaming cursors report offsets from the start of the stream.
///
/// # Failure and position
///
/// A failed `read` or `peek` never moves the cursor, whether it failed on
/// end of stream, malformed input or a source fault.
pub trait UnitCursor {
    /// The unit this cursor yields.
    type Unit: Unit;

    /// Consumes and returns the next unit.
    fn read(&mut self) -> Result<Self::Unit, Error>;

    /// Moves back by one unit.
    ///
    /// Returns [`Error::AtStreamStart`] when there is no unit to retract.
    fn unread(&mut self) -> Result<(), Error>;

    /// Offset of the next unit to be read.
    fn position(&self) -> usize;

    /// Units between two positions previously reported by
    /// [`position`](UnitCursor::position). Empty when `start >= end`.
    fn units_between(&self, start: usize, end: usize) -> Result<Vec<Self::Unit>, Error>;

    /// Attached sets and bookend shared by the provided methods.
    fn state(&self) -> &CursorState<Self::Unit>;

    /// Mutable access to [`state`](UnitCursor::state).
    fn state_mut(&mut self) -> &mut CursorState<Self::Unit>;

    /// Returns the next unit without consuming it.
    ///
    /// The provided implementation reads then unreads; backings override it
    /// to avoid churning their retraction history.
    fn peek(&mut self) -> Result<Self::Unit, Error> {
        let unit = self.read()?;
        self.unread()?;
        Ok(unit)
    }

    /// Reads exactly `n` units.
    ///
    /// If fewer remain, the units that were available come back in
    /// [`Partial::value`] with [`Error::EndOfStream`]. `n == 0` always
    /// succeeds with nothing, even at end of stream.
    fn read_count(&mut self, n: usize) -> RunResult<Self::Unit> {
        let mut units = Vec::with_capacity(n.min(1024));
        while units.len() < n {
            match self.read() {
                Ok(unit) => units.push(unit),
                Err(error) => return Err(Partial::new(units, error)),
            }
        }
        Ok(units)
    }

    /// Returns true if no unit remains.
    ///
    /// Malformed input ahead is not the end; only source faults are errors.
    fn is_at_end(&mut self) -> Result<bool, Error> {
        match self.peek() {
            Ok(_) | Err(Error::InvalidEncoding { .. }) => Ok(false),
            Err(Error::EndOfStream) => Ok(true),
            Err(error) => Err(error),
        }
    }

    /// Attaches named sets, returning the previously attached ones.
    fn attach_sets(
        &mut self,
        sets: impl Into<Arc<NamedSets<Self::Unit>>>,
    ) -> Option<Arc<NamedSets<Self::Unit>>>
    where
        Self: Sized,
    {
        self.state_mut().attach(sets.into())
    }

    fn detach_sets(&mut self) -> Option<Arc<NamedSets<Self::Unit>>> {
        self.state_mut().detach()
    }

    /// Consumes the longest run of units that belong to the set `name`.
    ///
    /// The first unit outside the set is left unconsumed. At end of stream
    /// with nothing read, fails with [`Error::EndOfStream`]; a run cut short
    /// by end of stream succeeds. Fails with [`Error::UndefinedSet`] if no
    /// sets are attached or `name` is missing.
    fn read_matching_set(&mut self, name: &str) -> RunResult<Self::Unit> {
        with_named_set(self, name, |cursor, set| {
            matcher::collect(cursor, |unit| set.contains(&unit))
        })
    }

    /// Like [`read_matching_set`](UnitCursor::read_matching_set) for units
    /// outside the set.
    fn read_not_matching_set(&mut self, name: &str) -> RunResult<Self::Unit> {
        with_named_set(self, name, |cursor, set| {
            matcher::collect(cursor, |unit| !set.contains(&unit))
        })
    }

    /// Fills `receiver` with the run of units in the set `name`, stopping
    /// when it is full. Returns the number of units written.
    fn read_matching_set_into(&mut self, name: &str, receiver: &mut [Self::Unit]) -> CountResult {
        with_named_set(self, name, |cursor, set| {
            matcher::fill(cursor, |unit| set.contains(&unit), receiver)
        })
    }

    fn read_not_matching_set_into(
        &mut self,
        name: &str,
        receiver: &mut [Self::Unit],
    ) -> CountResult {
        with_named_set(self, name, |cursor, set| {
            matcher::fill(cursor, |unit| !set.contains(&unit), receiver)
        })
    }

    /// Skips the run of units in the set `name`, returning how many.
    fn discard_matching_set(&mut self, name: &str) -> CountResult {
        with_named_set(self, name, |cursor, set| {
            matcher::discard(cursor, |unit| set.contains(&unit))
        })
    }

    fn discard_not_matching_set(&mut self, name: &str) -> CountResult {
        with_named_set(self, name, |cursor, set| {
            matcher::discard(cursor, |unit| !set.contains(&unit))
        })
    }

    /// Marks the current position.
    ///
    /// Fails with [`Error::AlreadyActive`] while another mark is active and
    /// with [`Error::EndOfStream`] when no unit remains.
    fn start_bookend(&mut self) -> Result<(), Error> {
        if self.state().bookend().is_active() {
            return Err(Error::AlreadyActive);
        }
        if self.is_at_end()? {
            return Err(Error::EndOfStream);
        }
        let position = self.position();
        self.state_mut().bookend_mut().start(position)
    }

    /// Units read since the mark, leaving the mark in place.
    ///
    /// Peeked units are not included. If the cursor was retracted before the
    /// mark the span is empty.
    fn units_since_bookend(&self) -> Result<Vec<Self::Unit>, Error> {
        let mark = self.state().bookend().mark().ok_or(Error::NoActiveMark)?;
        self.units_between(mark, self.position())
    }

    /// Units read since the mark, then clears the mark.
    fn stop_bookend(&mut self) -> Result<Vec<Self::Unit>, Error> {
        let units = self.units_since_bookend()?;
        self.state_mut().bookend_mut().clear();
        Ok(units)
    }
}

impl<C: UnitCursor + ?Sized> UnitCursor for &mut C {
    type Unit = C::Unit;

    #[inline]
    fn read(&mut self) -> Result<Self::Unit, Error> {
        (**self).read()
    }

    #[inline]
    fn unread(&mut self) -> Result<(), Error> {
        (**self).unread()
    }

    #[inline]
    fn position(&self) -> usize {
        (**self).position()
    }

    #[inline]
    fn units_between(&self, start: usize, end: usize) -> Result<Vec<Self::Unit>, Error> {
        (**self).units_between(start, end)
    }

    #[inline]
    fn state(&self) -> &CursorState<Self::Unit> {
        (**self).state()
    }

    #[inline]
    fn state_mut(&mut self) -> &mut CursorState<Self::Unit> {
        (**self).state_mut()
    }

    #[inline]
    fn peek(&mut self) -> Result<Self::Unit, Error> {
        (**self).peek()
    }
}

impl<C: UnitCursor + ?Sized> UnitCursor for Box<C> {
    type Unit = C::Unit;

    #[inline]
    fn read(&mut self) -> Result<Self::Unit, Error> {
        (**self).read()
    }

    #[inline]
    fn unread(&mut self) -> Result<(), Error> {
        (**self).unread()
    }

    #[inline]
    fn position(&self) -> usize {
        (**self).position()
    }

    #[inline]
    fn units_between(&self, start: usize, end: usize) -> Result<Vec<Self::Unit>, Error> {
        (**self).units_between(start, end)
    }

    #[inline]
    fn state(&self) -> &CursorState<Self::Unit> {
        (**self).state()
    }

    #[inline]
    fn state_mut(&mut self) -> &mut CursorState<Self::Unit> {
        (**self).state_mut()
    }

    #[inline]
    fn peek(&mut self) -> Result<Self::Unit, Error> {
        (**self).peek()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cursor relying on every provided method.
    struct Countdown {
        from: u8,
        pos: usize,
        state: CursorState<u8>,
    }

    impl UnitCursor for Countdown {
        type Unit = u8;

        fn read(&mut self) -> Result<u8, Error> {
            let remaining = usize::from(self.from).checked_sub(self.pos);
            match remaining {
                Some(n) if n > 0 => {
                    self.pos += 1;
                    Ok(n as u8)
                }
                _ => Err(Error::EndOfStream),
            }
        }

        fn unread(&mut self) -> Result<(), Error> {
            self.pos = self.pos.checked_sub(1).ok_or(Error::AtStreamStart)?;
            Ok(())
        }

        fn position(&self) -> usize {
            self.pos
        }

        fn units_between(&self, start: usize, end: usize) -> Result<Vec<u8>, Error> {
            Ok((start..end).map(|i| self.from - i as u8).collect())
        }

        fn state(&self) -> &CursorState<u8> {
            &self.state
        }

        fn state_mut(&mut self) -> &mut CursorState<u8> {
            &mut self.state
        }
    }

    fn countdown(from: u8) -> Countdown {
        Countdown {
            from,
            pos: 0,
            state: CursorState::new(),
        }
    }

    #[test]
    fn test_provided_peek_restores_position() {
        let mut cursor = countdown(3);
        assert_eq!(cursor.peek().unwrap(), 3);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.read_count(3).unwrap(), vec![3, 2, 1]);
        assert!(cursor.peek().unwrap_err().is_end_of_stream());
        assert!(cursor.is_at_end().unwrap());
    }

    fn mark_after_first(mut cursor: impl UnitCursor<Unit = u8>) {
        cursor.read().unwrap();
        cursor.start_bookend().unwrap();
        cursor.read_count(2).unwrap();
    }

    #[test]
    fn test_bookend_through_mutable_reference() {
        let mut cursor = countdown(5);
        mark_after_first(&mut cursor);
        assert_eq!(cursor.state().bookend().mark(), Some(1));
        assert_eq!(cursor.stop_bookend().unwrap(), vec![4, 3]);
        assert!(!cursor.state().bookend().is_active());
    }

    #[test]
    fn test_attach_replaces_sets() {
        let mut cursor = countdown(2);
        let mut first = NamedSets::new();
        first.add_from_units("odd", [1, 3]);
        assert!(cursor.attach_sets(first).is_none());
        assert!(cursor.attach_sets(NamedSets::new()).is_some());
        assert!(cursor.read_matching_set("odd").is_err());
    }
}
