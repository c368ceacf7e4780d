//! Buffer offsets anchored to either end of the buffer.

use crate::buffer::GapBuffer;
use crate::error::{EditError, EditResult};

/// Anything that resolves to an absolute offset against a buffer's current length
pub trait Anchor {
    fn absolute(&self, buffer: &GapBuffer) -> isize;
}

/// Offset counted from the start of the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StartRelative(pub isize);

/// Offset counted backwards from the end of the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndRelative(pub isize);

impl Anchor for StartRelative {
    fn absolute(&self, _buffer: &GapBuffer) -> isize {
        self.0
    }
}

impl Anchor for EndRelative {
    fn absolute(&self, buffer: &GapBuffer) -> isize {
        (buffer.len() as isize).saturating_sub(self.0)
    }
}

/// A single logical offset into a buffer.
///
/// A start-relative location keeps its absolute value when the buffer changes
/// after it; an end-relative one keeps it when the buffer changes before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Start(StartRelative),
    End(EndRelative),
}

impl Location {
    pub fn start_relative(offset: isize) -> Self {
        Self::Start(StartRelative(offset))
    }

    pub fn end_relative(offset: isize) -> Self {
        Self::End(EndRelative(offset))
    }

    pub fn absolute(&self, buffer: &GapBuffer) -> isize {
        match self {
            Self::Start(loc) => loc.absolute(buffer),
            Self::End(loc) => loc.absolute(buffer),
        }
    }

    /// Same offset, re-expressed from the buffer start
    pub fn as_start_relative(&self, buffer: &GapBuffer) -> Self {
        match self {
            Self::Start(_) => *self,
            Self::End(_) => Self::start_relative(self.absolute(buffer)),
        }
    }

    /// Same offset, re-expressed from the buffer end
    pub fn as_end_relative(&self, buffer: &GapBuffer) -> Self {
        match self {
            Self::Start(_) => {
                Self::end_relative((buffer.len() as isize).saturating_sub(self.absolute(buffer)))
            }
            Self::End(_) => *self,
        }
    }

    pub fn is_end_relative(&self) -> bool {
        matches!(self, Self::End(_))
    }

    /// Absolute offset, if it lies within `0..=len`
    pub fn validate(&self, buffer: &GapBuffer) -> EditResult<usize> {
        let pos = self.absolute(buffer);
        if pos < 0 {
            return Err(EditError::BeforeStart);
        }
        if pos as usize > buffer.len() {
            return Err(EditError::PastEnd);
        }
        Ok(pos as usize)
    }
}

impl Anchor for Location {
    fn absolute(&self, buffer: &GapBuffer) -> isize {
        Location::absolute(self, buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_relative_tracks_buffer_length() {
        let mut buffer = GapBuffer::from_text("0123456789");
        let loc = Location::end_relative(3);
        assert_eq!(loc.absolute(&buffer), 7);
        buffer.insert_str("ab");
        assert_eq!(loc.absolute(&buffer), 9);
    }

    #[test]
    fn test_conversions_preserve_current_offset() {
        let buffer = GapBuffer::from_text("0123456789");
        let start = Location::start_relative(4);
        let end = start.as_end_relative(&buffer);
        assert_eq!(end, Location::end_relative(6));
        assert_eq!(end.as_start_relative(&buffer), start);
        assert!(end.is_end_relative());
    }

    #[test]
    fn test_extreme_end_offsets_are_rejected() {
        let buffer = GapBuffer::from_text("abc");
        assert_eq!(
            Location::end_relative(isize::MIN).validate(&buffer),
            Err(EditError::PastEnd)
        );
        assert_eq!(
            Location::end_relative(isize::MAX).validate(&buffer),
            Err(EditError::BeforeStart)
        );
    }

    #[test]
    fn test_validate_bounds() {
        let buffer = GapBuffer::from_text("abc");
        assert_eq!(Location::start_relative(3).validate(&buffer), Ok(3));
        assert_eq!(
            Location::start_relative(4).validate(&buffer),
            Err(EditError::PastEnd)
        );
        assert_eq!(
            Location::start_relative(-1).validate(&buffer),
            Err(EditError::BeforeStart)
        );
        assert_eq!(
            Location::end_relative(5).validate(&buffer),
            Err(EditError::BeforeStart)
        );
    }
}
