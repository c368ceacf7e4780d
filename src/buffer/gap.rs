//! Gap buffer storage, cursor stepping and cursor-relative edits.

use std::fmt;
use std::path::{Path, PathBuf};

use super::undo::{UndoLog, UndoRecord};
use crate::error::{EditError, EditResult};
use crate::selection::Range;

/// Default pre-allocation for each half of the buffer
pub const DEFAULT_CAPACITY: usize = 4096;

/// A mutable byte sequence with a cursor.
///
/// Logical content is `pre ++ reverse(post)` and the cursor sits at
/// `pre.len()`. `line` (1-based) and `column` (bytes since the last newline
/// before the cursor) are kept in step with every cursor move and edit.
#[derive(Debug, Clone)]
pub struct GapBuffer {
    pub(super) pre: Vec<u8>,
    pub(super) post: Vec<u8>,
    pub(super) line: usize,
    pub(super) column: usize,
    pub(super) dirty: bool,
    pub(super) path: Option<PathBuf>,
    pub(super) backup: bool,
    pub(super) history: UndoLog,
    /// Set while an undo record is replayed so the replay is not logged again
    pub(super) undoing: bool,
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl GapBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty buffer with room for `capacity` bytes on each side of the gap
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pre: Vec::with_capacity(capacity),
            post: Vec::with_capacity(capacity),
            line: 1,
            column: 0,
            dirty: false,
            path: None,
            backup: true,
            history: UndoLog::new(),
            undoing: false,
        }
    }

    /// Create a clean buffer holding `text`, cursor at the start, nothing to undo
    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buffer = Self::with_capacity(bytes.len().max(DEFAULT_CAPACITY));
        buffer.load(bytes);
        buffer
    }

    /// Replace the whole content without logging undo records and mark the buffer clean
    pub(super) fn load(&mut self, bytes: &[u8]) {
        self.pre.clear();
        self.post.clear();
        self.post.extend(bytes.iter().rev());
        self.line = 1;
        self.column = 0;
        self.dirty = false;
        self.history.clear();
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    /// Total length in bytes
    pub fn len(&self) -> usize {
        self.pre.len() + self.post.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes the before-gap side can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.pre.capacity()
    }

    /// Cursor offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.pre.len()
    }

    /// Zero-length selection at the cursor
    pub fn cursor_range(&self) -> Range {
        Range::at_cursor(self)
    }

    /// 1-based line of the cursor
    pub fn line(&self) -> usize {
        self.line
    }

    /// 0-based column of the cursor
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Whether `write` rotates the existing file to `<name>.bak` first
    pub fn set_backup(&mut self, enabled: bool) {
        self.backup = enabled;
    }

    /// Whole content, left to right
    pub fn contents(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(&self.pre);
        bytes.extend(self.post.iter().rev());
        bytes
    }

    /// Content before and after the cursor, each in left-to-right order
    pub fn split(&self) -> (Vec<u8>, Vec<u8>) {
        (self.pre.clone(), self.post.iter().rev().copied().collect())
    }

    /// Iterate the content left to right without copying it
    pub(super) fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.pre.iter().chain(self.post.iter().rev()).copied()
    }

    // =========================================================================
    // Cursor stepping
    // =========================================================================

    fn step_forward(&mut self) -> bool {
        let Some(c) = self.post.pop() else {
            return false;
        };
        self.pre.push(c);
        if c == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        true
    }

    fn step_backward(&mut self) -> bool {
        let Some(c) = self.pre.pop() else {
            return false;
        };
        self.post.push(c);
        if c == b'\n' {
            self.line -= 1;
            self.column = self.column_from_pre();
        } else {
            self.column -= 1;
        }
        true
    }

    /// Column implied by the bytes currently before the cursor
    fn column_from_pre(&self) -> usize {
        self.pre.iter().rev().take_while(|&&c| c != b'\n').count()
    }

    /// Step towards `target`, which must be within `0..=len`
    fn seek(&mut self, target: usize) {
        while self.pre.len() > target && self.step_backward() {}
        while self.pre.len() < target && self.step_forward() {}
    }

    /// Move the cursor to an absolute offset.
    ///
    /// Offsets beyond the end leave the cursor at the end and report `PastEnd`.
    pub fn move_cursor_to(&mut self, pos: usize) -> EditResult<()> {
        let len = self.len();
        if pos > len {
            self.seek(len);
            return Err(EditError::PastEnd);
        }
        self.seek(pos);
        Ok(())
    }

    /// Move the cursor by a signed distance, stopping at either boundary
    pub fn move_cursor_by(&mut self, delta: isize) -> EditResult<()> {
        let current = self.position();
        if delta < 0 {
            let back = delta.unsigned_abs();
            if back > current {
                self.seek(0);
                return Err(EditError::BeforeStart);
            }
            self.seek(current - back);
            Ok(())
        } else {
            self.move_cursor_to(current.saturating_add(delta as usize))
        }
    }

    /// Move the cursor to the first byte of a 1-based line
    pub fn move_to_line(&mut self, line: usize) -> EditResult<()> {
        let pos = self.position_of_line(line)?;
        self.move_cursor_to(pos)
    }

    /// Move the cursor within the current line.
    ///
    /// Moving right never crosses a newline: that reports `InvalidColumn` and
    /// leaves the cursor at the end of the line.
    pub fn move_to_column(&mut self, column: usize) -> EditResult<()> {
        if column <= self.column {
            let back = self.column - column;
            self.seek(self.position() - back);
            return Ok(());
        }
        for _ in self.column..column {
            match self.post.last() {
                Some(b'\n') => return Err(EditError::InvalidColumn),
                Some(_) => {
                    self.step_forward();
                }
                None => return Err(EditError::PastEnd),
            }
        }
        Ok(())
    }

    // =========================================================================
    // Editing at the cursor
    // =========================================================================

    pub fn insert_char(&mut self, c: u8) {
        self.insert_chars(&[c]);
    }

    pub fn insert_str(&mut self, s: &str) {
        self.insert_chars(s.as_bytes());
    }

    /// Insert bytes at the cursor, leaving the cursor after them.
    ///
    /// One undo record covers the whole span.
    pub fn insert_chars(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let start = self.position();
        self.dirty = true;
        self.pre.reserve(bytes.len());
        for &c in bytes {
            self.pre.push(c);
            if c == b'\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        if !self.undoing {
            self.history.push(UndoRecord::Insert {
                start,
                len: bytes.len(),
            });
        }
    }

    /// Remove up to `|dist|` bytes after (`dist >= 0`) or before (`dist < 0`)
    /// the cursor and return them in left-to-right order.
    ///
    /// Over-long requests are clamped to what is available.
    pub fn cut(&mut self, dist: isize) -> Vec<u8> {
        let cursor = self.position();
        let removed = if dist >= 0 {
            let n = (dist as usize).min(self.post.len());
            let mut bytes = self.post.split_off(self.post.len() - n);
            bytes.reverse();
            bytes
        } else {
            let n = dist.unsigned_abs().min(self.pre.len());
            let bytes = self.pre.split_off(self.pre.len() - n);
            let newlines = bytes.iter().filter(|&&c| c == b'\n').count();
            if newlines > 0 {
                self.line -= newlines;
                self.column = self.column_from_pre();
            } else {
                self.column -= n;
            }
            bytes
        };

        if removed.is_empty() {
            return removed;
        }
        self.dirty = true;
        if !self.undoing {
            self.history.push(UndoRecord::Delete {
                position: self.position(),
                bytes: removed.clone(),
                cursor,
            });
        }
        removed
    }

    /// Return up to `|dist|` bytes after or before the cursor without changing anything.
    ///
    /// A NUL byte in the copied span reports `Invalid`.
    pub fn copy(&self, dist: isize) -> EditResult<Vec<u8>> {
        let bytes: Vec<u8> = if dist >= 0 {
            let n = (dist as usize).min(self.post.len());
            self.post.iter().rev().take(n).copied().collect()
        } else {
            let n = dist.unsigned_abs().min(self.pre.len());
            self.pre[self.pre.len() - n..].to_vec()
        };
        if bytes.contains(&0) {
            return Err(EditError::Invalid);
        }
        Ok(bytes)
    }

    /// Cut `[start, end)` and return the removed bytes
    pub fn delete_range(&mut self, start: usize, end: usize) -> EditResult<Vec<u8>> {
        if end < start {
            return Err(EditError::InvalidRange);
        }
        if end > self.len() {
            return Err(EditError::PastEnd);
        }
        self.move_cursor_to(start)?;
        Ok(self.cut((end - start) as isize))
    }

    pub fn insert_str_at(&mut self, pos: usize, s: &str) -> EditResult<()> {
        self.insert_chars_at(pos, s.as_bytes())
    }

    pub fn insert_chars_at(&mut self, pos: usize, bytes: &[u8]) -> EditResult<()> {
        self.move_cursor_to(pos)?;
        self.insert_chars(bytes);
        Ok(())
    }

    /// Remove all content (undoable)
    pub fn clear(&mut self) {
        self.seek(0);
        self.cut(self.post.len() as isize);
    }
}

impl fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.contents()))
    }
}
