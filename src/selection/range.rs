//! Selections: pairs of locations, optionally carrying pattern captures.

use super::{Location, PatternMatch};
use crate::buffer::GapBuffer;
use crate::error::{EditError, EditResult};

/// A selection `[start, end)` over one buffer.
///
/// A range produced by a pattern expression also carries the
/// [`PatternMatch`] it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    start: Location,
    end: Location,
    matched: Option<PatternMatch>,
}

impl Range {
    pub fn new(start: Location, end: Location) -> Self {
        Self {
            start,
            end,
            matched: None,
        }
    }

    /// Range between two absolute offsets, both counted from the buffer start
    pub fn from_offsets(start: usize, end: usize) -> Self {
        Self::new(
            Location::start_relative(start as isize),
            Location::start_relative(end as isize),
        )
    }

    /// Zero-length range at `location`
    pub fn point(location: Location) -> Self {
        Self::new(location, location)
    }

    /// The whole buffer, in normalized form so it keeps covering the whole
    /// buffer as it grows or shrinks
    pub fn whole() -> Self {
        Self::new(Location::start_relative(0), Location::end_relative(0))
    }

    /// Zero-length range at the buffer's cursor
    pub fn at_cursor(buffer: &GapBuffer) -> Self {
        Self::point(Location::start_relative(buffer.position() as isize))
    }

    pub fn with_match(mut self, matched: PatternMatch) -> Self {
        self.matched = Some(matched);
        self
    }

    pub fn start(&self) -> Location {
        self.start
    }

    pub fn end(&self) -> Location {
        self.end
    }

    /// Captures, when this range came from a pattern match
    pub fn pattern_match(&self) -> Option<&PatternMatch> {
        self.matched.as_ref()
    }

    pub fn is_pattern(&self) -> bool {
        self.matched.is_some()
    }

    /// Absolute `(start, end)` against the buffer's current length, unchecked
    pub fn bounds(&self, buffer: &GapBuffer) -> (isize, isize) {
        (self.start.absolute(buffer), self.end.absolute(buffer))
    }

    /// `end - start`, unchecked
    pub fn length(&self, buffer: &GapBuffer) -> isize {
        let (start, end) = self.bounds(buffer);
        end - start
    }

    /// Absolute `(start, end)` if both endpoints are in the buffer and in order
    pub fn validate(&self, buffer: &GapBuffer) -> EditResult<(usize, usize)> {
        let start = self.start.validate(buffer)?;
        let end = self.end.validate(buffer)?;
        if start > end {
            return Err(EditError::InvalidRange);
        }
        Ok((start, end))
    }

    /// Bytes covered by the range
    pub fn contents(&self, buffer: &GapBuffer) -> EditResult<Vec<u8>> {
        let (start, end) = self.validate(buffer)?;
        buffer.get_range(start, end)
    }

    /// Start anchored to the buffer start, end anchored to the buffer end.
    ///
    /// Edits after the range leave its start in place and edits before it
    /// leave its end in place. Captures are kept as they are.
    pub fn normalize(&self, buffer: &GapBuffer) -> Self {
        Self {
            start: self.start.as_start_relative(buffer),
            end: self.end.as_end_relative(buffer),
            matched: self.matched.clone(),
        }
    }
}
