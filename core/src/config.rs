//! Cursor configuration for refill sizes, retraction depth and buffer retention.
//!
//! This module provides [`CursorConfig`] for controlling how the streaming
//! cursors talk to their [`ByteSource`](crate::ByteSource) and how much of
//! the consumed stream they keep in memory. Fixed-buffer cursors only read
//! [`CursorConfig::history_capacity`].
//!
//! # Example
//!
//! ```ignore
//! use cursorkit_core::config::{CursorConfig, Retention};
//!
//! // Default: keep the whole consumed stream buffered.
//! let config = CursorConfig::default();
//!
//! // Bounded memory: only keep what unread and bookends can still reach.
//! let config = CursorConfig::new()
//!     .with_read_chunk_size(4096)
//!     .with_retention(Retention::Window);
//! ```

/// What a streaming cursor does with bytes it has already consumed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Retention {
    /// Keep every byte read from the source for the lifetime of the cursor.
    #[default]
    Full,
    /// Before each refill, drop consumed bytes that neither the retraction
    /// history nor an active bookend can reach.
    Window,
}

/// Configuration for cursor behavior and resource limits.
///
/// # Default Values
///
/// | Setting | Default |
/// |---------|---------|
/// | `read_chunk_size` | 9000 bytes |
/// | `initial_capacity` | 18000 bytes |
/// | `history_capacity` | 16 units |
/// | `retention` | [`Retention::Full`] |
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorConfig {
    /// Size of the buffer handed to [`ByteSource::fill`](crate::ByteSource::fill)
    /// on each refill.
    pub read_chunk_size: usize,

    /// Initial capacity reserved for the streaming buffer.
    pub initial_capacity: usize,

    /// Number of consumed code point widths remembered for `unread`.
    ///
    /// Byte streams under [`Retention::Window`] keep this many consumed bytes.
    pub history_capacity: usize,

    /// Streaming buffer retention policy.
    pub retention: Retention,
}

impl Default for CursorConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CursorConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        read_chunk_size: 9000,
        initial_capacity: 18000,
        history_capacity: 16,
        retention: Retention::Full,
    };

    /// Creates a new configuration with default values.
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the refill size. Zero is clamped to one byte.
    #[inline]
    pub const fn with_read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = if size == 0 { 1 } else { size };
        self
    }

    #[inline]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the retraction history depth.
    #[inline]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    #[inline]
    pub const fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    /// Refill size actually used, never zero.
    #[inline]
    pub(crate) const fn chunk_size(&self) -> usize {
        if self.read_chunk_size == 0 {
            1
        } else {
            self.read_chunk_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_config_defaults() {
        let config = CursorConfig::default();
        assert_eq!(config.read_chunk_size, 9000);
        assert_eq!(config.initial_capacity, 18000);
        assert_eq!(config.history_capacity, 16);
        assert_eq!(config.retention, Retention::Full);
    }

    #[test]
    fn test_cursor_config_builder() {
        let config = CursorConfig::new()
            .with_read_chunk_size(64)
            .with_initial_capacity(128)
            .with_history_capacity(4)
            .with_retention(Retention::Window);

        assert_eq!(config.read_chunk_size, 64);
        assert_eq!(config.initial_capacity, 128);
        assert_eq!(config.history_capacity, 4);
        assert_eq!(config.retention, Retention::Window);
    }

    #[test]
    fn test_zero_chunk_size_clamps() {
        let config = CursorConfig::new().with_read_chunk_size(0);
        assert_eq!(config.read_chunk_size, 1);

        // A struct literal can still carry zero; the effective size cannot.
        let raw = CursorConfig {
            read_chunk_size: 0,
            ..CursorConfig::DEFAULT
        };
        assert_eq!(raw.chunk_size(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_cursor_config_serde() {
        let config = CursorConfig::new().with_retention(Retention::Window);
        let json = serde_json::to_string(&config).unwrap();
        let back: CursorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
