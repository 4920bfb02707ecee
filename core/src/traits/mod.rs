//! Core traits for the cursorkit framework.
//!
//! # Trait Hierarchy
//!
//! ```text
//! UnitCursor (read / unread / peek over one Unit type)
//!     ├── named-set runs   (read_matching_set, discard_matching_set, ...)
//!     └── bookends         (start_bookend, stop_bookend, ...)
//!
//! Unit (u8, char)
//!
//! ByteSource (refill protocol for the streaming cursors)
//!     ├── ReaderSource<R: io::Read>
//!     └── ScriptedSource
//! ```
//!
//! # Usage Patterns
//!
//! ```ignore
//! use cursorkit::{UnitCursor, Error};
//!
//! fn skip_to_digit(cursor: &mut impl UnitCursor<Unit = char>) -> Result<(), Error> {
//!     loop {
//!         if cursor.peek()?.is_ascii_digit() {
//!             return Ok(());
//!         }
//!         cursor.read()?;
//!     }
//! }
//! ```

mod cursor;
mod source;
mod unit;

pub use cursor::{CursorState, UnitCursor};
pub use source::{ByteSource, Fill, ReaderSource, ScriptedSource, Step};
pub use unit::Unit;
