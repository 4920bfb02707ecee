pub mod config;
mod bookend;
mod bytes;
mod chars;
mod error;
mod history;
pub mod matcher;
mod sets;
mod stream;
pub mod traits;
mod utf8;

pub use bookend::Bookend;
pub use bytes::ByteCursor;
pub use chars::CharCursor;
pub use config::{CursorConfig, Retention};
pub use error::{CountResult, Error, Partial, RunResult};
pub use matcher::RunMatcher;
pub use sets::{ByteSets, CharSets, NamedSets};
pub use stream::{ByteStreamCursor, Utf8StreamCursor};
pub use traits::{
    ByteSource, CursorState, Fill, ReaderSource, ScriptedSource, Step, Unit, UnitCursor,
};
pub use utf8::Utf8Cursor;
