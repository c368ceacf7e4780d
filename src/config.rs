//! Editor configuration persistence
//!
//! Stores preferences in `~/.config/carve/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::buffer::{GapBuffer, DEFAULT_UNDO_LIMIT};

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Maximum undo records kept per buffer; older records are dropped
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,

    /// Keep the previous file contents as `<name>.bak` when writing
    #[serde(default = "default_backup")]
    pub backup: bool,

    /// Minimum bytes pre-allocated on each side of the gap, for new buffers
    /// and opened files alike (files also get twice their size)
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
}

fn default_undo_limit() -> usize {
    DEFAULT_UNDO_LIMIT
}

fn default_backup() -> bool {
    true
}

fn default_initial_capacity() -> usize {
    crate::buffer::DEFAULT_CAPACITY
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_limit: default_undo_limit(),
            backup: default_backup(),
            initial_capacity: default_initial_capacity(),
        }
    }
}

impl EditorConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`; a missing or malformed file gives defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Apply buffer-level settings to `buffer`
    pub fn configure(&self, buffer: &mut GapBuffer) {
        buffer.set_backup(self.backup);
        buffer.set_undo_limit(self.undo_limit);
    }

    /// Fresh empty buffer using these settings
    pub fn new_buffer(&self) -> GapBuffer {
        let mut buffer = GapBuffer::with_capacity(self.initial_capacity);
        self.configure(&mut buffer);
        buffer
    }
}
