//! Byte-oriented gap buffer with cursor semantics and a single-level undo log.
//!
//! # Architecture
//!
//! - [`GapBuffer`]: storage split at the cursor into `pre` (in order) and
//!   `post` (reversed, so popping yields the byte nearest the cursor)
//! - `query`: cursorless lookups (byte at, range, line/column conversions)
//! - [`UndoLog`] / [`UndoRecord`]: reversible insert and delete records
//! - `io`: reading a file into a buffer and writing it back with one `.bak`
//!   generation
//!
//! # Example
//!
//! ```
//! use carve::buffer::GapBuffer;
//!
//! let mut buffer = GapBuffer::from_text("hello\nworld\n");
//! buffer.move_cursor_to(6).unwrap();
//! buffer.insert_str("big ");
//! assert_eq!(buffer.to_string(), "hello\nbig world\n");
//! assert_eq!((buffer.line(), buffer.column()), (2, 4));
//!
//! buffer.undo().unwrap();
//! assert_eq!(buffer.to_string(), "hello\nworld\n");
//! ```

mod gap;
mod io;
mod query;
mod undo;

pub use gap::{GapBuffer, DEFAULT_CAPACITY};
pub use io::backup_path;
pub use undo::{UndoLog, UndoRecord, DEFAULT_UNDO_LIMIT};
