//! Structured expressions: rules that map an input selection to a new one.
//!
//! Every variant is evaluated by [`Expr::eval`] against a buffer and the
//! current selection. Failure carries no partial result.
//!
//! ```
//! use carve::buffer::GapBuffer;
//! use carve::expr::Expr;
//! use carve::selection::Range;
//!
//! let buffer = GapBuffer::from_text("let x = 1;\nlet y = 2;\n");
//! // the first number after "y"
//! let expr = Expr::after(Expr::pattern("y").unwrap(), Expr::pattern("[0-9]+").unwrap());
//! let found = expr.eval(&buffer, &Range::whole()).unwrap();
//! assert_eq!(found.contents(&buffer).unwrap(), b"2");
//! ```

use std::fmt;

use regex::bytes::Regex;

use crate::buffer::GapBuffer;
use crate::error::{EditError, EditResult};
use crate::selection::{Location, PatternMatch, Range};

/// A compiled regular expression
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(source)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.as_str())
    }
}

/// A structured expression
#[derive(Debug, Clone)]
pub enum Expr {
    /// Absolute byte offset; negative counts back from the buffer end
    Char(isize),
    /// Byte offset from the selection start
    StartRelChar(isize),
    /// Byte offset from the selection end
    EndRelChar(isize),
    /// Start of a 1-based line; negative counts back from the last line
    Line(isize),
    /// Start of the line `n` lines after the one holding the selection start
    StartRelLine(isize),
    /// Start of the line `n` lines after the one holding the selection end
    EndRelLine(isize),
    /// A `(line, column)` position
    Grid { line: usize, column: usize },
    /// From the start of the first expression's result to the end of the second's
    Span(Box<Expr>, Box<Expr>),
    /// First match of a pattern within the selection
    Pattern(Pattern),
    /// First expression, or the second if the first fails
    Choice(Box<Expr>, Box<Expr>),
    /// Second expression, searched after the first one's result
    After(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Compile a pattern expression
    pub fn pattern(source: &str) -> Result<Self, regex::Error> {
        Ok(Self::Pattern(Pattern::new(source)?))
    }

    pub fn span(start: Expr, end: Expr) -> Self {
        Self::Span(Box::new(start), Box::new(end))
    }

    pub fn choice(first: Expr, second: Expr) -> Self {
        Self::Choice(Box::new(first), Box::new(second))
    }

    pub fn after(before: Expr, then: Expr) -> Self {
        Self::After(Box::new(before), Box::new(then))
    }

    /// Resolve this expression against `selection`
    pub fn eval(&self, buffer: &GapBuffer, selection: &Range) -> EditResult<Range> {
        let result = match self {
            Self::Char(offset) => {
                let base = if *offset >= 0 { 0 } else { buffer.len() as isize };
                point(buffer, base + offset)
            }
            Self::StartRelChar(offset) => {
                point(buffer, shift(selection.start().absolute(buffer), *offset)?)
            }
            Self::EndRelChar(offset) => point(buffer, shift(selection.end().absolute(buffer), *offset)?),
            Self::Line(line) => {
                let target = match *line {
                    n if n > 0 => n,
                    n if n < 0 => buffer.last_line() as isize + n,
                    _ => return Err(EditError::InvalidLine),
                };
                line_start(buffer, target)
            }
            Self::StartRelLine(delta) => {
                let base = selection.start().validate(buffer)?;
                relative_line(buffer, base, *delta)
            }
            Self::EndRelLine(delta) => {
                let base = selection.end().validate(buffer)?;
                relative_line(buffer, base, *delta)
            }
            Self::Grid { line, column } => {
                let pos = buffer.position_of_line_and_column(*line, *column)?;
                point(buffer, pos as isize)
            }
            Self::Span(start, end) => {
                selection.validate(buffer)?;
                let first = start.eval(buffer, selection)?;
                let last = end.eval(buffer, selection)?;
                if first.start().absolute(buffer) > last.end().absolute(buffer) {
                    return Err(EditError::InvalidRange);
                }
                Ok(Range::new(first.start(), last.end()))
            }
            Self::Pattern(pattern) => find(buffer, selection, pattern),
            Self::Choice(first, second) => first
                .eval(buffer, selection)
                .or_else(|_| second.eval(buffer, selection)),
            Self::After(before, then) => {
                let anchor = before.eval(buffer, selection)?;
                let rest = Range::new(anchor.end(), selection.end()).normalize(buffer);
                let (start, end) = rest.bounds(buffer);
                if end <= start {
                    return Err(EditError::InvalidRange);
                }
                then.eval(buffer, &rest)
            }
        };
        tracing::trace!(expr = ?self, ok = result.is_ok(), "evaluated expression");
        result
    }
}

/// Zero-length range at an absolute offset, which must lie in the buffer
fn point(buffer: &GapBuffer, pos: isize) -> EditResult<Range> {
    let location = Location::start_relative(pos);
    location.validate(buffer)?;
    Ok(Range::point(location))
}

fn line_start(buffer: &GapBuffer, line: isize) -> EditResult<Range> {
    if line < 1 {
        return Err(EditError::InvalidLine);
    }
    let pos = buffer.position_of_line(line as usize)?;
    point(buffer, pos as isize)
}

/// `base + offset`, reporting overflow as running off the matching end
fn shift(base: isize, offset: isize) -> EditResult<isize> {
    base.checked_add(offset).ok_or(if offset < 0 {
        EditError::BeforeStart
    } else {
        EditError::PastEnd
    })
}

fn relative_line(buffer: &GapBuffer, base: usize, delta: isize) -> EditResult<Range> {
    let (line, _) = buffer.coordinates(base)?;
    let target = (line as isize)
        .checked_add(delta)
        .ok_or(EditError::InvalidLine)?;
    line_start(buffer, target)
}

/// First match of `pattern` inside the selection's current contents
fn find(buffer: &GapBuffer, selection: &Range, pattern: &Pattern) -> EditResult<Range> {
    let (start, _) = selection.validate(buffer)?;
    let haystack = selection.contents(buffer)?;
    let captures = pattern
        .regex
        .captures(&haystack)
        .ok_or(EditError::MatchFailed)?;
    let whole = captures.get(0).ok_or(EditError::MatchFailed)?;
    let range = Range::new(
        Location::start_relative((start + whole.start()) as isize),
        Location::start_relative((start + whole.end()) as isize),
    );
    Ok(range.with_match(PatternMatch::from_captures(&captures)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> GapBuffer {
        GapBuffer::from_text("1abc\n2def\n3ghi\n")
    }

    #[test]
    fn test_char_from_end() {
        let buffer = buffer();
        let r = Expr::Char(-1).eval(&buffer, &Range::whole()).unwrap();
        assert_eq!(r.bounds(&buffer), (14, 14));
        assert_eq!(
            Expr::Char(16).eval(&buffer, &Range::whole()),
            Err(EditError::PastEnd)
        );
    }

    #[test]
    fn test_huge_relative_offsets_fail_instead_of_overflowing() {
        let buffer = buffer();
        let selection = Range::from_offsets(2, 4);
        assert_eq!(
            Expr::StartRelChar(isize::MAX).eval(&buffer, &selection),
            Err(EditError::PastEnd)
        );
        assert_eq!(
            Expr::EndRelChar(isize::MAX).eval(&buffer, &selection),
            Err(EditError::PastEnd)
        );
        assert_eq!(
            Expr::StartRelChar(isize::MIN).eval(&buffer, &selection),
            Err(EditError::BeforeStart)
        );
        assert_eq!(
            Expr::StartRelLine(isize::MAX).eval(&buffer, &selection),
            Err(EditError::InvalidLine)
        );
        assert_eq!(
            Expr::EndRelLine(isize::MIN).eval(&buffer, &selection),
            Err(EditError::InvalidLine)
        );
    }

    #[test]
    fn test_line_zero_is_invalid() {
        let buffer = buffer();
        assert_eq!(
            Expr::Line(0).eval(&buffer, &Range::whole()),
            Err(EditError::InvalidLine)
        );
    }

    #[test]
    fn test_pattern_failure_is_match_failed() {
        let buffer = buffer();
        let expr = Expr::pattern("xyz").unwrap();
        assert_eq!(
            expr.eval(&buffer, &Range::whole()),
            Err(EditError::MatchFailed)
        );
    }

    #[test]
    fn test_pattern_searches_only_the_selection() {
        let buffer = buffer();
        let expr = Expr::pattern("[0-9]").unwrap();
        let r = expr.eval(&buffer, &Range::from_offsets(6, 15)).unwrap();
        assert_eq!(r.bounds(&buffer), (10, 11));
    }

    #[test]
    fn test_invalid_pattern_is_a_construction_error() {
        assert!(Expr::pattern("(unclosed").is_err());
    }

    #[test]
    fn test_pattern_debug_shows_source() {
        let expr = Expr::pattern("a+b").unwrap();
        assert_eq!(format!("{:?}", expr), "Pattern(Pattern(\"a+b\"))");
    }
}
