//! Failure taxonomy shared by the buffer, selection, expression and action layers.
//!
//! Every fallible operation in the core returns [`EditResult`]. The flat
//! [`ResultCode`] set is what callers outside Rust (the script front end, the
//! `--json` report) see; [`EditError::code`] maps one onto the other.

use serde::Serialize;
use thiserror::Error;

/// Errors produced by buffer, selection, expression and action operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Position lies after the end of the buffer
    #[error("position is past the end of the buffer")]
    PastEnd,
    /// Position lies before the start of the buffer
    #[error("position is before the start of the buffer")]
    BeforeStart,
    /// Requested length exceeds what is available
    #[error("requested length is too long")]
    TooLong,
    /// Operation could not be carried out (empty undo log, NUL during copy, ...)
    #[error("invalid operation")]
    Invalid,
    /// Range endpoints are out of order
    #[error("range start comes after its end")]
    InvalidRange,
    /// Template referenced a capture group the match does not have
    #[error("template references capture ${index}, which the match does not have")]
    InvalidReplacement { index: usize },
    /// Pattern found no match in the selection
    #[error("pattern did not match")]
    MatchFailed,
    /// Line number does not exist in the buffer
    #[error("line does not exist")]
    InvalidLine,
    /// Column would cross a line boundary
    #[error("column crosses a line boundary")]
    InvalidColumn,
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for EditError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result alias used across the editing core
pub type EditResult<T> = Result<T, EditError>;

/// Flat status code, including success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    Succeeded,
    PastEnd,
    BeforeStart,
    TooLong,
    Invalid,
    InvalidRange,
    InvalidReplacement,
    MatchFailed,
    InvalidLine,
    InvalidColumn,
    IoError,
}

impl ResultCode {
    /// Status code of an operation result
    pub fn of<T>(result: &EditResult<T>) -> Self {
        match result {
            Ok(_) => Self::Succeeded,
            Err(err) => err.code(),
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Succeeded
    }
}

impl EditError {
    pub fn code(&self) -> ResultCode {
        match self {
            Self::PastEnd => ResultCode::PastEnd,
            Self::BeforeStart => ResultCode::BeforeStart,
            Self::TooLong => ResultCode::TooLong,
            Self::Invalid => ResultCode::Invalid,
            Self::InvalidRange => ResultCode::InvalidRange,
            Self::InvalidReplacement { .. } => ResultCode::InvalidReplacement,
            Self::MatchFailed => ResultCode::MatchFailed,
            Self::InvalidLine => ResultCode::InvalidLine,
            Self::InvalidColumn => ResultCode::InvalidColumn,
            Self::Io(_) => ResultCode::IoError,
        }
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Succeeded => "SUCCEEDED",
            Self::PastEnd => "PAST_END",
            Self::BeforeStart => "BEFORE_START",
            Self::TooLong => "TOO_LONG",
            Self::Invalid => "INVALID",
            Self::InvalidRange => "INVALID_RANGE",
            Self::InvalidReplacement => "INVALID_REPLACEMENT",
            Self::MatchFailed => "MATCH_FAILED",
            Self::InvalidLine => "INVALID_LINE",
            Self::InvalidColumn => "INVALID_COLUMN",
            Self::IoError => "IO_ERROR",
        };
        f.write_str(name)
    }
}
