//! Named classification sets.
//!
//! A [`NamedSets`] maps a set name to a set of units. It is built up front,
//! then attached to a cursor with
//! [`UnitCursor::attach_sets`](crate::UnitCursor::attach_sets), after which
//! the cursor only reads it.
//!
//! # Example
//!
//! ```ignore
//! let mut sets = ByteSets::new();
//! sets.add_from_text("alpha", "abcdefghijklmnopqrstuvwxyz")
//!     .add_from_units("blank", [b' ', b'\t']);
//!
//! let mut cursor = ByteCursor::new(b"abc def".as_slice());
//! cursor.attach_sets(sets);
//! assert_eq!(cursor.read_matching_set("alpha").unwrap(), b"abc");
//! ```

use std::collections::{HashMap, HashSet};

use crate::traits::Unit;
use crate::utf8::{Decoded, decode_first};

/// A named collection of unit sets.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSets<U: Unit> {
    sets: HashMap<String, HashSet<U>>,
}

/// Sets of raw bytes.
pub type ByteSets = NamedSets<u8>;

/// Sets of code points.
pub type CharSets = NamedSets<char>;

impl<U: Unit> NamedSets<U> {
    #[inline]
    pub fn new() -> Self {
        Self {
            sets: HashMap::new(),
        }
    }

    /// Stores the units named by `text` under `name`, replacing any existing
    /// set with that name.
    ///
    /// For byte sets, code points above 255 are ignored.
    pub fn add_from_text(&mut self, name: impl Into<String>, text: &str) -> &mut Self {
        self.sets.insert(name.into(), U::from_text(text).collect());
        self
    }

    /// Stores an explicit list of units under `name`, replacing any existing
    /// set with that name.
    pub fn add_from_units(
        &mut self,
        name: impl Into<String>,
        units: impl IntoIterator<Item = U>,
    ) -> &mut Self {
        self.sets.insert(name.into(), units.into_iter().collect());
        self
    }

    /// Looks up the set `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&HashSet<U>> {
        self.sets.get(name)
    }

    #[inline]
    pub fn contains_set(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    /// Returns true if the set `name` exists and holds `unit`.
    #[inline]
    pub fn is_member(&self, name: &str, unit: U) -> bool {
        self.sets.get(name).is_some_and(|set| set.contains(&unit))
    }

    /// Names of all defined sets, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl NamedSets<char> {
    /// Decodes UTF-8 `bytes` into a code point set stored under `name`.
    ///
    /// Decoding stops at the first malformed or truncated sequence; the code
    /// points before it are kept.
    pub fn add_from_utf8_bytes(&mut self, name: impl Into<String>, bytes: &[u8]) -> &mut Self {
        let mut set = HashSet::new();
        let mut rest = bytes;
        while let Decoded::Char(ch, width) = decode_first(rest) {
            set.insert(ch);
            rest = &rest[width..];
        }
        self.sets.insert(name.into(), set);
        self
    }
}

impl<U: Unit> Default for NamedSets<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Unit, N: Into<String>, I: IntoIterator<Item = U>> FromIterator<(N, I)> for NamedSets<U> {
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut sets = Self::new();
        for (name, units) in iter {
            sets.add_from_units(name, units);
        }
        sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_from_text_overwrites() {
        let mut sets = CharSets::new();
        sets.add_from_text("s", "abc").add_from_text("s", "xy");
        assert_eq!(sets.len(), 1);
        assert!(sets.is_member("s", 'x'));
        assert!(!sets.is_member("s", 'a'));
    }

    #[test]
    fn test_byte_set_from_text() {
        let mut sets = ByteSets::new();
        sets.add_from_text("s", "a\u{2200}\u{ff}");
        let set = sets.get("s").unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&b'a'));
        assert!(set.contains(&0xFF));
    }

    #[test]
    fn test_utf8_bytes_stop_at_malformed() {
        let mut bytes = "a\u{2200}".as_bytes().to_vec();
        bytes.push(0xFF);
        bytes.push(b'z');

        let mut sets = CharSets::new();
        sets.add_from_utf8_bytes("s", &bytes);
        let set = sets.get("s").unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&'\u{2200}'));
        assert!(!set.contains(&'z'));
    }

    #[test]
    fn test_from_iterator() {
        let sets: ByteSets = [("digits", b"0123".to_vec()), ("blank", vec![b' '])]
            .into_iter()
            .collect();
        assert!(sets.contains_set("digits"));
        assert!(sets.is_member("blank", b' '));
        assert!(!sets.contains_set("alpha"));

        let mut names: Vec<_> = sets.names().collect();
        names.sort_unstable();
        assert_eq!(names, ["blank", "digits"]);
    }
}
