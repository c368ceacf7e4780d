//! Edit actions: mutations applied to a buffer through a selection.
//!
//! Every action validates its range before touching the buffer. Sequences and
//! loops stop at the first failing step and keep whatever earlier steps did.

use crate::buffer::GapBuffer;
use crate::error::{EditError, EditResult};
use crate::expr::Expr;
use crate::selection::{Location, Range};

/// Where a text action puts its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Before the range
    Insert,
    /// After the range
    Append,
    /// In place of the range
    Replace,
}

/// An edit action
#[derive(Debug, Clone)]
pub enum Action {
    /// Remove the range
    Delete,
    /// Insert, append or replace text. When the range came from a pattern,
    /// `text` is a template whose `$n` markers expand to captures.
    Text { kind: TextKind, text: String },
    /// Run each action against the same range
    Sequence(Vec<Action>),
    /// Run `body` on every match of `pattern` within the range
    Loop { pattern: Expr, body: Box<Action> },
}

impl Action {
    pub fn insert(text: impl Into<String>) -> Self {
        Self::Text {
            kind: TextKind::Insert,
            text: text.into(),
        }
    }

    pub fn append(text: impl Into<String>) -> Self {
        Self::Text {
            kind: TextKind::Append,
            text: text.into(),
        }
    }

    pub fn replace(text: impl Into<String>) -> Self {
        Self::Text {
            kind: TextKind::Replace,
            text: text.into(),
        }
    }

    pub fn delete() -> Self {
        Self::Delete
    }

    pub fn sequence(actions: Vec<Action>) -> Self {
        Self::Sequence(actions)
    }

    pub fn repeat(pattern: Expr, body: Action) -> Self {
        Self::Loop {
            pattern,
            body: Box::new(body),
        }
    }

    /// Apply this action to `range`
    pub fn execute(&self, buffer: &mut GapBuffer, range: &Range) -> EditResult<()> {
        let (start, end) = range.validate(buffer)?;
        match self {
            Self::Delete => {
                buffer.move_cursor_to(start)?;
                buffer.cut((end - start) as isize);
                Ok(())
            }
            Self::Text { kind, text } => {
                let text = resolve_text(text, range)?;
                match kind {
                    TextKind::Insert => buffer.move_cursor_to(start)?,
                    TextKind::Append => buffer.move_cursor_to(end)?,
                    TextKind::Replace => {
                        buffer.move_cursor_to(start)?;
                        buffer.cut((end - start) as isize);
                    }
                }
                buffer.insert_chars(&text);
                Ok(())
            }
            Self::Sequence(actions) => {
                for action in actions {
                    action.execute(buffer, range)?;
                }
                Ok(())
            }
            Self::Loop { pattern, body } => run_loop(pattern, body, buffer, range),
        }
    }
}

/// Literal text, or the template expanded against the range's captures
fn resolve_text(text: &str, range: &Range) -> EditResult<Vec<u8>> {
    match range.pattern_match() {
        Some(matched) => matched.instantiate_template(text),
        None => Ok(text.as_bytes().to_vec()),
    }
}

/// Search resumes at the end of the region the body just edited. An empty
/// match is not accepted at that exact offset, so the loop always advances.
/// A result outside the remaining window (an expression that ignores the
/// selection, such as `Char(0)`) ends the loop.
fn run_loop(
    pattern: &Expr,
    body: &Action,
    buffer: &mut GapBuffer,
    range: &Range,
) -> EditResult<()> {
    let scope = range.normalize(buffer);
    let limit = scope.end();
    let mut from = scope.start().absolute(buffer);
    let mut resumed_at: Option<isize> = None;
    let mut iterations = 0usize;

    while from <= limit.absolute(buffer) {
        let window = Range::new(Location::start_relative(from), limit);
        let found = match pattern.eval(buffer, &window) {
            Ok(found) => found.normalize(buffer),
            Err(EditError::MatchFailed) => break,
            Err(err) => return Err(err),
        };
        let (match_start, match_end) = found.bounds(buffer);
        if match_start < from || match_end > limit.absolute(buffer) {
            tracing::debug!(match_start, match_end, from, "loop result outside window");
            break;
        }
        if match_start == match_end && resumed_at == Some(match_start) {
            from = match_start + 1;
            resumed_at = None;
            continue;
        }

        body.execute(buffer, &found)?;
        iterations += 1;

        from = found.end().absolute(buffer);
        resumed_at = Some(from);
    }

    tracing::debug!(iterations, "loop finished");
    Ok(())
}
