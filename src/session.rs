//! Session: the set of open buffers
//!
//! Buffers are looked up by path. Opening a path that is already open hands
//! back the existing buffer instead of reading the file a second time. The
//! most recently opened (or explicitly selected) buffer is the active one.

use std::path::{Path, PathBuf};

use crate::action::Action;
use crate::buffer::GapBuffer;
use crate::config::EditorConfig;
use crate::error::{EditError, EditResult};
use crate::expr::Expr;
use crate::selection::Range;

/// Selection an expression is evaluated against in [`Session::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// The whole active buffer
    #[default]
    WholeBuffer,
    /// The zero-length range at the active buffer's cursor
    Cursor,
}

impl Origin {
    fn range(self, buffer: &GapBuffer) -> Range {
        match self {
            Self::WholeBuffer => Range::whole(),
            Self::Cursor => buffer.cursor_range(),
        }
    }
}

/// Open buffers plus the editor configuration they were created with
#[derive(Debug, Default)]
pub struct Session {
    config: EditorConfig,
    buffers: Vec<GapBuffer>,
    active: Option<usize>,
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            buffers: Vec::new(),
            active: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Open `path` and make it the active buffer.
    ///
    /// An already-open path returns the existing buffer untouched. With
    /// `create`, a missing file gives an empty buffer bound to `path`;
    /// nothing is written until the buffer is.
    pub fn open(&mut self, path: impl AsRef<Path>, create: bool) -> EditResult<&mut GapBuffer> {
        let path = path.as_ref();
        if let Some(index) = self.find_open_file(path) {
            tracing::debug!("{} already open", path.display());
            self.active = Some(index);
            return Ok(&mut self.buffers[index]);
        }

        let mut buffer = if path.exists() || !create {
            GapBuffer::open_with_capacity(path, self.config.initial_capacity)?
        } else {
            tracing::debug!("Creating new buffer for {}", path.display());
            let mut buffer = self.config.new_buffer();
            buffer.set_path(path);
            buffer
        };
        self.config.configure(&mut buffer);

        self.buffers.push(buffer);
        let index = self.buffers.len() - 1;
        self.active = Some(index);
        Ok(&mut self.buffers[index])
    }

    /// Open buffer for `path`, if any
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&GapBuffer> {
        self.find_open_file(path.as_ref())
            .map(|index| &self.buffers[index])
    }

    pub fn get_mut(&mut self, path: impl AsRef<Path>) -> Option<&mut GapBuffer> {
        self.find_open_file(path.as_ref())
            .map(move |index| &mut self.buffers[index])
    }

    /// Check if a file is already open
    pub fn is_file_open(&self, path: impl AsRef<Path>) -> bool {
        self.find_open_file(path.as_ref()).is_some()
    }

    pub fn active(&self) -> Option<&GapBuffer> {
        self.active.map(|index| &self.buffers[index])
    }

    pub fn active_mut(&mut self) -> Option<&mut GapBuffer> {
        self.active.map(move |index| &mut self.buffers[index])
    }

    /// Make the open buffer for `path` active. Fails with `Invalid` when the
    /// path is not open.
    pub fn set_active(&mut self, path: impl AsRef<Path>) -> EditResult<()> {
        let index = self
            .find_open_file(path.as_ref())
            .ok_or(EditError::Invalid)?;
        self.active = Some(index);
        Ok(())
    }

    /// Paths of all open buffers, in opening order
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.buffers.iter().filter_map(|buffer| buffer.path())
    }

    /// Evaluate `expr` on the active buffer and run `action` on the result.
    ///
    /// Returns the range the action was applied to.
    pub fn apply(&mut self, expr: &Expr, action: &Action, origin: Origin) -> EditResult<Range> {
        let buffer = self.active_mut().ok_or(EditError::Invalid)?;
        let selection = origin.range(buffer);
        let target = expr.eval(buffer, &selection)?;
        action.execute(buffer, &target)?;
        Ok(target)
    }

    /// Write every buffer with unsaved changes.
    ///
    /// Returns how many were written. Stops at the first failure; buffers
    /// written before it stay written.
    pub fn write_all(&mut self) -> EditResult<usize> {
        let mut written = 0;
        for buffer in &mut self.buffers {
            if buffer.write()? {
                written += 1;
            }
        }
        tracing::debug!("Wrote {} of {} buffers", written, self.buffers.len());
        Ok(written)
    }

    /// Index of the buffer bound to `path`, comparing canonical paths when
    /// both sides exist on disk
    fn find_open_file(&self, path: &Path) -> Option<usize> {
        let wanted = canonical(path);
        self.buffers.iter().position(|buffer| {
            buffer
                .path()
                .is_some_and(|open| canonical(open) == wanted)
        })
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
