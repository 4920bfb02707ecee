//! Contiguous run scanning over any [`UnitCursor`].
//!
//! Every run operation runs the same scan: read a unit; if it qualifies keep
//! it and continue, otherwise unread it and stop; stop too when the cursor
//! reports end of stream.
//!
#![cfg_attr(feature = "docs", doc = simple_mermaid::mermaid!("../docs/diagrams/run_scan.mmd"))]
//!
//! # End of stream
//!
//! | Situation | Result |
//! |-----------|--------|
//! | next unit fails to qualify (including immediately) | `Ok(run)` |
//! | stream ends after at least one qualifying unit | `Ok(run)` |
//! | stream already at end before any unit | `Err(Partial { value: empty, error: EndOfStream })` |
//! | any other error | `Err(Partial { value: run so far, error })` |
//!
//! The table holds for collecting, filling and discarding, in both matching
//! and not-matching polarity, and for predicates and named sets alike.
//!
//! # Example
//!
//! ```ignore
//! use cursorkit::{RunMatcher, Utf8Cursor};
//!
//! let mut matcher = RunMatcher::new(Utf8Cursor::new("  hello world"));
//! assert_eq!(matcher.discard_whitespace().unwrap(), 2);
//! assert_eq!(matcher.read_word().unwrap(), "hello".chars().collect::<Vec<_>>());
//! ```

use std::collections::HashSet;

use crate::error::{CountResult, Error, Partial, RunResult};
use crate::traits::{Unit, UnitCursor};

/// Scans at most `limit` qualifying units, handing each to `keep`.
///
/// Returns the number of qualifying units consumed.
pub(crate) fn scan<C>(
    cursor: &mut C,
    mut qualifies: impl FnMut(C::Unit) -> bool,
    limit: usize,
    mut keep: impl FnMut(C::Unit),
) -> CountResult
where
    C: UnitCursor + ?Sized,
{
    let mut count = 0;
    while count < limit {
        match cursor.read() {
            Ok(unit) if qualifies(unit) => {
                keep(unit);
                count += 1;
            }
            Ok(_) => {
                cursor
                    .unread()
                    .map_err(|error| Partial::new(count, error))?;
                break;
            }
            Err(Error::EndOfStream) if count > 0 => break,
            Err(error) => return Err(Partial::new(count, error)),
        }
    }
    Ok(count)
}

pub(crate) fn collect<C>(cursor: &mut C, qualifies: impl FnMut(C::Unit) -> bool) -> RunResult<C::Unit>
where
    C: UnitCursor + ?Sized,
{
    let mut run = Vec::with_capacity(16);
    match scan(cursor, qualifies, usize::MAX, |unit| run.push(unit)) {
        Ok(_) => Ok(run),
        Err(partial) => Err(partial.map(|_| run)),
    }
}

pub(crate) fn fill<C>(
    cursor: &mut C,
    qualifies: impl FnMut(C::Unit) -> bool,
    receiver: &mut [C::Unit],
) -> CountResult
where
    C: UnitCursor + ?Sized,
{
    let limit = receiver.len();
    let mut slots = receiver.iter_mut();
    scan(cursor, qualifies, limit, |unit| {
        if let Some(slot) = slots.next() {
            *slot = unit;
        }
    })
}

pub(crate) fn discard<C>(cursor: &mut C, qualifies: impl FnMut(C::Unit) -> bool) -> CountResult
where
    C: UnitCursor + ?Sized,
{
    scan(cursor, qualifies, usize::MAX, |_| {})
}

/// Resolves the set `name` on the cursor, then runs `run` against it.
pub(crate) fn with_named_set<C, R>(
    cursor: &mut C,
    name: &str,
    run: impl FnOnce(&mut C, &HashSet<C::Unit>) -> Result<R, Partial<R>>,
) -> Result<R, Partial<R>>
where
    C: UnitCursor + ?Sized,
    R: Default,
{
    let Some(sets) = cursor.state().sets().cloned() else {
        tracing::debug!(name, "set lookup with no sets attached");
        return Err(Partial::new(R::default(), Error::undefined_set(name)));
    };
    let Some(set) = sets.get(name) else {
        tracing::debug!(name, "set lookup for an undefined name");
        return Err(Partial::new(R::default(), Error::undefined_set(name)));
    };
    run(cursor, set)
}

/// Predicate-driven run operations over a wrapped cursor.
///
/// Wrap a cursor by value, or by `&mut` to keep using it afterwards.
#[derive(Debug)]
pub struct RunMatcher<C> {
    cursor: C,
}

impl<C: UnitCursor> RunMatcher<C> {
    #[inline]
    pub fn new(cursor: C) -> Self {
        Self { cursor }
    }

    #[inline]
    pub fn get_ref(&self) -> &C {
        &self.cursor
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut C {
        &mut self.cursor
    }

    #[inline]
    pub fn into_inner(self) -> C {
        self.cursor
    }

    /// Consumes the run of units for which `predicate` holds.
    pub fn read_matching(&mut self, predicate: impl FnMut(C::Unit) -> bool) -> RunResult<C::Unit> {
        collect(&mut self.cursor, predicate)
    }

    /// Consumes the run of units for which `predicate` does not hold.
    pub fn read_not_matching(
        &mut self,
        mut predicate: impl FnMut(C::Unit) -> bool,
    ) -> RunResult<C::Unit> {
        collect(&mut self.cursor, |unit| !predicate(unit))
    }

    /// Writes the run of units for which `predicate` holds into `receiver`.
    ///
    /// Stops when `receiver` is full, leaving the cursor on the next unit even
    /// if it would also qualify.
    pub fn read_matching_into(
        &mut self,
        predicate: impl FnMut(C::Unit) -> bool,
        receiver: &mut [C::Unit],
    ) -> CountResult {
        fill(&mut self.cursor, predicate, receiver)
    }

    /// Fills `receiver` with the run of units for which `predicate` fails.
    pub fn read_not_matching_into(
        &mut self,
        mut predicate: impl FnMut(C::Unit) -> bool,
        receiver: &mut [C::Unit],
    ) -> CountResult {
        fill(&mut self.cursor, |unit| !predicate(unit), receiver)
    }

    /// Skips the run of units for which `predicate` holds.
    pub fn discard_matching(&mut self, predicate: impl FnMut(C::Unit) -> bool) -> CountResult {
        discard(&mut self.cursor, predicate)
    }

    /// Skips the run of units for which `predicate` fails.
    pub fn discard_not_matching(
        &mut self,
        mut predicate: impl FnMut(C::Unit) -> bool,
    ) -> CountResult {
        discard(&mut self.cursor, |unit| !predicate(unit))
    }

    #[inline]
    pub fn read_whitespace(&mut self) -> RunResult<C::Unit> {
        self.read_matching(Unit::is_whitespace)
    }

    #[inline]
    pub fn read_whitespace_into(&mut self, receiver: &mut [C::Unit]) -> CountResult {
        self.read_matching_into(Unit::is_whitespace, receiver)
    }

    /// Consumes the run of non-whitespace units.
    #[inline]
    pub fn read_word(&mut self) -> RunResult<C::Unit> {
        self.read_not_matching(Unit::is_whitespace)
    }

    #[inline]
    pub fn read_word_into(&mut self, receiver: &mut [C::Unit]) -> CountResult {
        self.read_not_matching_into(Unit::is_whitespace, receiver)
    }

    #[inline]
    pub fn discard_whitespace(&mut self) -> CountResult {
        self.discard_matching(Unit::is_whitespace)
    }

    #[inline]
    pub fn discard_word(&mut self) -> CountResult {
        self.discard_not_matching(Unit::is_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ByteCursor, CharCursor};

    #[test]
    fn test_scan_respects_limit() {
        let mut cursor = ByteCursor::new(b"aaaa".as_slice());
        let mut kept = Vec::new();
        let count = scan(&mut cursor, |b| b == b'a', 3, |b| kept.push(b)).unwrap();
        assert_eq!(count, 3);
        assert_eq!(kept, b"aaa");
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_scan_zero_limit_reads_nothing() {
        let mut cursor = ByteCursor::new(Vec::new());
        assert_eq!(scan(&mut cursor, |_| true, 0, |_| {}).unwrap(), 0);
    }

    #[test]
    fn test_collect_retracts_disqualifying_unit() {
        let mut cursor = CharCursor::from_text("ab1");
        let run = collect(&mut cursor, char::is_alphabetic).unwrap();
        assert_eq!(run, vec!['a', 'b']);
        assert_eq!(cursor.read().unwrap(), '1');
    }

    #[test]
    fn test_collect_at_end_reports_eof() {
        let mut cursor = CharCursor::from_text("");
        let partial = collect(&mut cursor, |_| true).unwrap_err();
        assert!(partial.value.is_empty());
        assert!(partial.is_end_of_stream());
    }

    #[test]
    fn test_fill_stops_when_receiver_full() {
        let mut cursor = ByteCursor::new(b"xxxxx".as_slice());
        let mut receiver = [0u8; 2];
        assert_eq!(fill(&mut cursor, |_| true, &mut receiver).unwrap(), 2);
        assert_eq!(&receiver, b"xx");
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_matcher_by_mutable_reference() {
        let mut cursor = CharCursor::from_text("  x");
        let mut matcher = RunMatcher::new(&mut cursor);
        assert_eq!(matcher.discard_whitespace().unwrap(), 2);
        assert_eq!(cursor.read().unwrap(), 'x');
    }
}
