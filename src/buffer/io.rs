//! Loading buffers from files and writing them back.
//!
//! Files are flat bytes: no header, no encoding conversion. A write keeps one
//! backup generation, `<name>.bak`, replacing any older one.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::GapBuffer;
use crate::error::{EditError, EditResult};

/// `<path>.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

impl GapBuffer {
    /// Create a buffer bound to `path` holding the file's contents
    pub fn open(path: impl AsRef<Path>) -> EditResult<Self> {
        Self::open_with_capacity(path, 0)
    }

    /// Like [`GapBuffer::open`], reserving at least `capacity` bytes on each
    /// side of the gap (and never less than twice the file size)
    pub fn open_with_capacity(path: impl AsRef<Path>, capacity: usize) -> EditResult<Self> {
        let path = path.as_ref();
        let size = fs::metadata(path)?.len() as usize;
        let mut buffer = Self::with_capacity(size.saturating_mul(2).max(capacity));
        buffer.path = Some(path.to_path_buf());
        buffer.read()?;
        Ok(buffer)
    }

    /// Reload from the backing file
    pub fn read(&mut self) -> EditResult<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| EditError::Io("buffer has no file name".to_string()))?;
        self.read_from(&path)
    }

    /// Replace the content with the bytes of `path`.
    ///
    /// On failure the buffer is left unchanged. On success the buffer is
    /// clean, the undo log is empty and the cursor is at the start.
    pub fn read_from(&mut self, path: impl AsRef<Path>) -> EditResult<()> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| {
            tracing::debug!("Failed to read {}: {}", path.display(), e);
            EditError::from(e)
        })?;
        self.load(&contents);
        tracing::debug!("Read {} bytes from {}", contents.len(), path.display());
        Ok(())
    }

    /// Write to the backing file if there are unsaved changes.
    ///
    /// Returns whether anything was written.
    pub fn write(&mut self) -> EditResult<bool> {
        if !self.dirty {
            return Ok(false);
        }
        let path = self
            .path
            .clone()
            .ok_or_else(|| EditError::Io("buffer has no file name".to_string()))?;
        self.write_file(&path)?;
        Ok(true)
    }

    /// Bind the buffer to `path` and write it there unconditionally
    pub fn write_as(&mut self, path: impl Into<PathBuf>) -> EditResult<()> {
        let path = path.into();
        self.write_file(&path)?;
        self.path = Some(path);
        Ok(())
    }

    fn write_file(&mut self, path: &Path) -> EditResult<()> {
        if self.backup && path.is_file() {
            let backup = backup_path(path);
            if backup.is_file() {
                fs::remove_file(&backup)?;
            }
            fs::rename(path, &backup)?;
            tracing::debug!("Rotated {} to {}", path.display(), backup.display());
        }
        fs::write(path, self.contents()).map_err(|e| {
            tracing::warn!("Failed to write {}: {}", path.display(), e);
            EditError::from(e)
        })?;
        self.dirty = false;
        tracing::debug!("Wrote {} bytes to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/tmp/notes.txt")),
            PathBuf::from("/tmp/notes.txt.bak")
        );
    }

    #[test]
    fn test_write_without_path_is_io_error() {
        let mut buffer = GapBuffer::new();
        buffer.insert_str("x");
        assert!(matches!(buffer.write(), Err(EditError::Io(_))));
        assert!(buffer.is_dirty());
    }

    #[test]
    fn test_clean_buffer_write_is_noop() {
        let mut buffer = GapBuffer::from_text("x");
        assert_eq!(buffer.write(), Ok(false));
    }
}
