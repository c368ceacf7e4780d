//! Undo log for the gap buffer.

use std::collections::VecDeque;

use super::GapBuffer;
use crate::error::{EditError, EditResult};

/// Number of records kept before the oldest are dropped
pub const DEFAULT_UNDO_LIMIT: usize = 1000;

/// A reversible description of one edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoRecord {
    /// `len` bytes were inserted at `start`; undone by cutting them again
    Insert { start: usize, len: usize },
    /// `bytes` were removed at `position` while the cursor was at `cursor`;
    /// undone by re-inserting them and restoring the cursor
    Delete {
        position: usize,
        bytes: Vec<u8>,
        cursor: usize,
    },
}

/// LIFO stack of undo records with a size cap
#[derive(Debug, Clone)]
pub struct UndoLog {
    records: VecDeque<UndoRecord>,
    limit: usize,
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoLog {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_UNDO_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit,
        }
    }

    pub fn push(&mut self, record: UndoRecord) {
        self.records.push_back(record);
        while self.records.len() > self.limit {
            self.records.pop_front();
        }
    }

    pub fn pop(&mut self) -> Option<UndoRecord> {
        self.records.pop_back()
    }

    /// Most recent record, if any
    pub fn last(&self) -> Option<&UndoRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        while self.records.len() > self.limit {
            self.records.pop_front();
        }
    }
}

impl GapBuffer {
    /// Reverse the most recent edit.
    ///
    /// An empty log reports `Invalid` and leaves the buffer as it is.
    pub fn undo(&mut self) -> EditResult<()> {
        let Some(record) = self.history.pop() else {
            tracing::debug!("undo requested with an empty log");
            return Err(EditError::Invalid);
        };
        tracing::debug!(?record, "replaying undo record");

        self.undoing = true;
        let result = self.replay(&record);
        self.undoing = false;
        result
    }

    fn replay(&mut self, record: &UndoRecord) -> EditResult<()> {
        match record {
            UndoRecord::Insert { start, len } => {
                self.move_cursor_to(*start)?;
                self.cut(*len as isize);
                Ok(())
            }
            UndoRecord::Delete {
                position,
                bytes,
                cursor,
            } => {
                self.move_cursor_to(*position)?;
                self.insert_chars(bytes);
                self.move_cursor_to(*cursor)
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &UndoLog {
        &self.history
    }

    pub fn set_undo_limit(&mut self, limit: usize) {
        self.history.set_limit(limit);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_trims_oldest_past_limit() {
        let mut log = UndoLog::with_limit(3);
        for start in 0..5 {
            log.push(UndoRecord::Insert { start, len: 1 });
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.pop(), Some(UndoRecord::Insert { start: 4, len: 1 }));
    }

    #[test]
    fn test_lowering_limit_trims_immediately() {
        let mut log = UndoLog::new();
        for start in 0..10 {
            log.push(UndoRecord::Insert { start, len: 1 });
        }
        log.set_limit(2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_insert_records_one_entry_per_call() {
        let mut buffer = GapBuffer::new();
        buffer.insert_str("hello");
        assert_eq!(buffer.undo_count(), 1);
        assert_eq!(
            buffer.history().last(),
            Some(&UndoRecord::Insert { start: 0, len: 5 })
        );
    }

    #[test]
    fn test_cut_records_removed_bytes() {
        let mut buffer = GapBuffer::from_text("abcdef");
        buffer.move_cursor_to(4).unwrap();
        buffer.cut(-2);
        assert_eq!(
            buffer.history().last(),
            Some(&UndoRecord::Delete {
                position: 2,
                bytes: b"cd".to_vec(),
                cursor: 4,
            })
        );
    }

    #[test]
    fn test_undo_does_not_log_its_own_replay() {
        let mut buffer = GapBuffer::new();
        buffer.insert_str("one");
        buffer.insert_str("two");
        buffer.undo().unwrap();
        assert_eq!(buffer.undo_count(), 1);
        assert!(!buffer.undoing);
        assert_eq!(buffer.to_string(), "one");
    }

    #[test]
    fn test_undo_on_empty_log_is_an_error() {
        let mut buffer = GapBuffer::from_text("abc");
        assert_eq!(buffer.undo(), Err(EditError::Invalid));
        assert_eq!(buffer.to_string(), "abc");
    }

    #[test]
    fn test_undo_forward_cut_restores_cursor() {
        let mut buffer = GapBuffer::from_text("ab\ncdef");
        buffer.move_cursor_to(2).unwrap();
        buffer.cut(3);
        buffer.undo().unwrap();
        assert_eq!(buffer.to_string(), "ab\ncdef");
        assert_eq!(buffer.position(), 2);
        assert_eq!((buffer.line(), buffer.column()), (1, 2));
    }
}
