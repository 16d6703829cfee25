//! Error types for visual checkpoint matching.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```no_run
//! use visual_checkpoint::{Checkpoint, Error, MatchWindowTask, Result};
//!
//! async fn example(task: &MatchWindowTask) -> Result<bool> {
//!     match task.match_window(&Checkpoint::new("home")).await {
//!         Ok(result) => Ok(result.as_expected),
//!         Err(e) if e.is_config_error() => {
//!             eprintln!("fix the checkpoint settings: {e}");
//!             Err(e)
//!         }
//!         Err(Error::Cancelled) => Ok(false),
//!         Err(e) => Err(e),
//!     }
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Regions | [`Error::OutOfBounds`] |
//! | Frames | [`Error::NoFrames`] |
//! | Capture | [`Error::Driver`], [`Error::Screenshot`], [`Error::Image`] |
//! | Transport | [`Error::Comparator`], [`Error::ServerStatus`], [`Error::Http`], [`Error::Protocol`] |
//! | Execution | [`Error::Cancelled`] |
//! | External | [`Error::Io`], [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use image::ImageError;
use thiserror::Error;

use crate::geometry::Region;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when a caller-supplied setting is invalid, before any
    /// capture or network activity takes place.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Region Errors
    // ========================================================================
    /// Region does not intersect the screenshot.
    ///
    /// Returned by region resolution. The engine drops such regions and
    /// keeps going.
    #[error("Region {region} is out of bounds of {bounds}")]
    OutOfBounds {
        /// The region that was requested, in screenshot coordinates.
        region: Region,
        /// The bounds it was checked against.
        bounds: Region,
    },

    // ========================================================================
    // Frame Errors
    // ========================================================================
    /// The frame chain is empty.
    ///
    /// Returned when a query needs the outermost frame.
    #[error("No frames in frame chain")]
    NoFrames,

    // ========================================================================
    // Capture Errors
    // ========================================================================
    /// The screenshot provider or driver failed.
    #[error("Driver error: {message}")]
    Driver {
        /// Description of the driver failure.
        message: String,
    },

    /// Screenshot data could not be decoded or cropped.
    #[error("Screenshot error: {message}")]
    Screenshot {
        /// Description of the screenshot failure.
        message: String,
    },

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// The remote comparator failed or returned an unusable reply.
    #[error("Comparator error: {message}")]
    Comparator {
        /// Description of the comparator failure.
        message: String,
    },

    /// The remote comparator answered with a non-success status.
    #[error("Comparator returned status {status}: {message}")]
    ServerStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Match request framing violation.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// The checkpoint was cancelled while waiting.
    #[error("Checkpoint cancelled")]
    Cancelled,

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image encoding or decoding error.
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an out-of-bounds error.
    #[inline]
    pub fn out_of_bounds(region: Region, bounds: Region) -> Self {
        Self::OutOfBounds { region, bounds }
    }

    /// Creates a driver error.
    #[inline]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Creates a screenshot error.
    #[inline]
    pub fn screenshot(message: impl Into<String>) -> Self {
        Self::Screenshot {
            message: message.into(),
        }
    }

    /// Creates a comparator error.
    #[inline]
    pub fn comparator(message: impl Into<String>) -> Self {
        Self::Comparator {
            message: message.into(),
        }
    }

    /// Creates a server status error.
    #[inline]
    pub fn server_status(status: u16, message: impl Into<String>) -> Self {
        Self::ServerStatus {
            status,
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if the caller must change its configuration.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Returns `true` if this is an out-of-bounds region error.
    ///
    /// These are safe to skip: a single bad region never aborts a checkpoint.
    #[inline]
    #[must_use]
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if this error came from reaching the comparator.
    #[inline]
    #[must_use]
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::Comparator { .. }
                | Self::ServerStatus { .. }
                | Self::Http(_)
                | Self::Protocol { .. }
        )
    }

    /// Returns `true` if this error must abort the checkpoint.
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !self.is_out_of_bounds()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_config_error() {
        let err = Error::config("timeout too small");
        assert_eq!(err.to_string(), "Configuration error: timeout too small");
        assert!(err.is_config_error());
        assert!(err.is_fatal());
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = Error::out_of_bounds(Region::new(900, 0, 50, 50), Region::new(0, 0, 800, 600));
        assert_eq!(
            err.to_string(),
            "Region (900, 0) 50x50 is out of bounds of (0, 0) 800x600"
        );
        assert!(err.is_out_of_bounds());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_no_frames_display() {
        assert_eq!(Error::NoFrames.to_string(), "No frames in frame chain");
    }

    #[test]
    fn test_is_transport_error() {
        assert!(Error::comparator("bad reply").is_transport_error());
        assert!(Error::server_status(503, "unavailable").is_transport_error());
        assert!(Error::protocol("too large").is_transport_error());
        assert!(!Error::config("test").is_transport_error());
        assert!(!Error::NoFrames.is_transport_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
