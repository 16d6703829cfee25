//! Debug screenshot dumps.
//!
//! When enabled, every screenshot the engine acquires is written to disk
//! so failed checkpoints can be inspected afterwards.

// ============================================================================
// Imports
// ============================================================================

use std::env;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::error::Result;

use super::Screenshot;

// ============================================================================
// Constants
// ============================================================================

/// Environment variable holding the output directory.
pub const PATH_ENV: &str = "DEBUG_SCREENSHOT_PATH";

/// Environment variable holding the file name prefix.
pub const PREFIX_ENV: &str = "DEBUG_SCREENSHOT_PREFIX";

/// Default file name prefix.
const DEFAULT_PREFIX: &str = "screenshot_";

// ============================================================================
// DebugScreenshots
// ============================================================================

/// Writes screenshots as `{prefix}_{timestamp}_{suffix}.png` files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugScreenshots {
    path: PathBuf,
    prefix: String,
}

impl Default for DebugScreenshots {
    fn default() -> Self {
        Self::new(".")
    }
}

impl DebugScreenshots {
    /// Writes into `path` with the default prefix.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Reads [`PATH_ENV`] and [`PREFIX_ENV`], falling back to `.` and
    /// `screenshot_`.
    #[must_use]
    pub fn from_env() -> Self {
        let path = env::var_os(PATH_ENV).map_or_else(|| PathBuf::from("."), PathBuf::from);
        let prefix = env::var(PREFIX_ENV).unwrap_or_else(|_| DEFAULT_PREFIX.to_string());
        Self { path, prefix }
    }

    /// Sets the file name prefix.
    #[inline]
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Returns the output directory.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file name prefix.
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Saves a screenshot and returns the written path.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written.
    pub fn save(&self, screenshot: &Screenshot, suffix: &str) -> Result<PathBuf> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let file_name = format!("{}_{}_{}.png", self.prefix, timestamp, suffix);
        let full_path = self.path.join(file_name);

        debug!(path = %full_path.display(), "Saving debug screenshot");
        screenshot.save_png(&full_path)?;
        Ok(full_path)
    }
}

// ============================================================================
// Tests
// ============================================================================
