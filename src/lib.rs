//! carve - structural editing on byte buffers
//!
//! A gap buffer with cursor semantics and undo, a small algebra of
//! selection expressions (offsets, lines, patterns and their combinations),
//! and actions that edit whatever an expression selects.

pub mod action;
pub mod buffer;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod expr;
pub mod selection;
pub mod session;
pub mod tracing;

// Re-export commonly used types
pub use action::Action;
pub use buffer::GapBuffer;
pub use config::EditorConfig;
pub use error::{EditError, EditResult, ResultCode};
pub use expr::Expr;
pub use selection::{Location, Range};
pub use session::Session;
