//! Cursorless queries. None of these move the cursor.

use super::GapBuffer;
use crate::error::{EditError, EditResult};

impl GapBuffer {
    /// Byte at an absolute offset
    pub fn char_at(&self, pos: usize) -> EditResult<u8> {
        let pre_len = self.pre.len();
        if pos >= self.len() {
            return Err(EditError::PastEnd);
        }
        if pos < pre_len {
            Ok(self.pre[pos])
        } else {
            Ok(self.post[self.post.len() - 1 - (pos - pre_len)])
        }
    }

    /// Bytes in `[start, end)`
    pub fn get_range(&self, start: usize, end: usize) -> EditResult<Vec<u8>> {
        if start > end {
            return Err(EditError::InvalidRange);
        }
        if end > self.len() {
            return Err(EditError::PastEnd);
        }
        Ok(self.bytes().skip(start).take(end - start).collect())
    }

    /// Offset of the first byte of a 1-based line.
    ///
    /// Line 1 always starts at 0. Any other line must begin before the end of
    /// the buffer, so the empty line after a trailing newline is not addressable.
    pub fn position_of_line(&self, line: usize) -> EditResult<usize> {
        if line == 0 {
            return Err(EditError::InvalidLine);
        }
        if line == 1 {
            return Ok(0);
        }
        let len = self.len();
        let mut current = 1;
        for (pos, c) in self.bytes().enumerate() {
            if c != b'\n' {
                continue;
            }
            current += 1;
            if current == line {
                let start = pos + 1;
                return if start < len {
                    Ok(start)
                } else {
                    Err(EditError::InvalidLine)
                };
            }
        }
        Err(EditError::InvalidLine)
    }

    /// Offset of `(line, column)`; the column may not run past the line's newline
    pub fn position_of_line_and_column(&self, line: usize, column: usize) -> EditResult<usize> {
        let mut pos = self.position_of_line(line)?;
        for _ in 0..column {
            match self.char_at(pos) {
                Ok(b'\n') | Err(_) => return Err(EditError::InvalidColumn),
                Ok(_) => pos += 1,
            }
        }
        Ok(pos)
    }

    /// 1-based line and 0-based column of an offset.
    ///
    /// This is a left-to-right scan from the start of the buffer, O(pos).
    pub fn coordinates(&self, pos: usize) -> EditResult<(usize, usize)> {
        if pos > self.len() {
            return Err(EditError::PastEnd);
        }
        let mut line = 1;
        let mut column = 0;
        for c in self.bytes().take(pos) {
            if c == b'\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        Ok((line, column))
    }

    /// Line number of the end-of-buffer position
    pub fn last_line(&self) -> usize {
        1 + self.bytes().filter(|&c| c == b'\n').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GapBuffer {
        let mut buffer = GapBuffer::from_text("1abc\n2def\n3ghi\n");
        // Park the cursor mid-buffer so queries cross the gap
        buffer.move_cursor_to(7).unwrap();
        buffer
    }

    #[test]
    fn test_char_at_on_both_sides_of_gap() {
        let buffer = sample();
        assert_eq!(buffer.char_at(0), Ok(b'1'));
        assert_eq!(buffer.char_at(6), Ok(b'd'));
        assert_eq!(buffer.char_at(7), Ok(b'e'));
        assert_eq!(buffer.char_at(14), Ok(b'\n'));
        assert_eq!(buffer.char_at(15), Err(EditError::PastEnd));
    }

    #[test]
    fn test_get_range() {
        let buffer = sample();
        assert_eq!(buffer.get_range(3, 9).unwrap(), b"c\n2def".to_vec());
        assert_eq!(buffer.get_range(15, 15).unwrap(), Vec::<u8>::new());
        assert_eq!(buffer.get_range(3, 16), Err(EditError::PastEnd));
        assert_eq!(buffer.get_range(5, 3), Err(EditError::InvalidRange));
    }

    #[test]
    fn test_position_of_line() {
        let buffer = sample();
        assert_eq!(buffer.position_of_line(1), Ok(0));
        assert_eq!(buffer.position_of_line(2), Ok(5));
        assert_eq!(buffer.position_of_line(3), Ok(10));
        assert_eq!(buffer.position_of_line(4), Err(EditError::InvalidLine));
        assert_eq!(buffer.position_of_line(0), Err(EditError::InvalidLine));
    }

    #[test]
    fn test_position_of_line_and_column() {
        let buffer = sample();
        assert_eq!(buffer.position_of_line_and_column(2, 2), Ok(7));
        assert_eq!(buffer.position_of_line_and_column(2, 4), Ok(9));
        assert_eq!(
            buffer.position_of_line_and_column(2, 5),
            Err(EditError::InvalidColumn)
        );
        assert_eq!(
            buffer.position_of_line_and_column(9, 0),
            Err(EditError::InvalidLine)
        );
    }

    #[test]
    fn test_coordinates_match_cursor_tracking() {
        let buffer = sample();
        assert_eq!(
            buffer.coordinates(buffer.position()),
            Ok((buffer.line(), buffer.column()))
        );
        assert_eq!(buffer.coordinates(15), Ok((4, 0)));
        assert_eq!(buffer.coordinates(16), Err(EditError::PastEnd));
    }

    #[test]
    fn test_queries_do_not_move_cursor() {
        let buffer = sample();
        let _ = buffer.get_range(0, 15);
        let _ = buffer.coordinates(12);
        let _ = buffer.position_of_line(3);
        assert_eq!(buffer.position(), 7);
    }

    #[test]
    fn test_last_line() {
        assert_eq!(GapBuffer::from_text("a\nb\n").last_line(), 3);
        assert_eq!(GapBuffer::from_text("a\nb").last_line(), 2);
        assert_eq!(GapBuffer::new().last_line(), 1);
    }
}
