use core::fmt::Debug;
use core::hash::Hash;

/// The atomic element a cursor reads: a raw byte or a decoded code point.
pub trait Unit: Copy + Eq + Hash + Debug + 'static {
    /// Decodes literal text into the units it names.
    ///
    /// Used by [`NamedSets::add_from_text`](crate::NamedSets::add_from_text).
    fn from_text(text: &str) -> impl Iterator<Item = Self> + '_;

    /// Unicode whitespace test backing the whitespace and word conveniences.
    fn is_whitespace(self) -> bool;
}

impl Unit for u8 {
    /// Yields every code point that fits in a byte; wider ones are skipped.
    #[inline]
    fn from_text(text: &str) -> impl Iterator<Item = Self> + '_ {
        text.chars().filter_map(|ch| u8::try_from(ch).ok())
    }

    /// Classifies the byte as its Latin-1 code point.
    #[inline]
    fn is_whitespace(self) -> bool {
        char::from(self).is_whitespace()
    }
}

impl Unit for char {
    #[inline]
    fn from_text(text: &str) -> impl Iterator<Item = Self> + '_ {
        text.chars()
    }

    #[inline]
    fn is_whitespace(self) -> bool {
        char::is_whitespace(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_units_skip_wide_code_points() {
        let units: Vec<u8> = u8::from_text("a\u{e9}\u{2200}b").collect();
        assert_eq!(units, vec![b'a', 0xE9, b'b']);
    }

    #[test]
    fn test_byte_whitespace_is_latin1() {
        assert!(b' '.is_whitespace());
        assert!(0x0B_u8.is_whitespace());
        assert!(0x85_u8.is_whitespace());
        assert!(0xA0_u8.is_whitespace());
        assert!(!b'x'.is_whitespace());
    }

    #[test]
    fn test_char_whitespace_is_unicode() {
        assert!('\u{3000}'.is_whitespace());
        assert!(Unit::is_whitespace('\u{2029}'));
        assert!(!Unit::is_whitespace('\u{200B}'));
    }
}
