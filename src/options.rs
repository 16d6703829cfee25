//! Checkpoint engine configuration.
//!
//! Provides a type-safe interface for the settings shared by every
//! checkpoint of a session: default retry timeout, polling interval, settle
//! delay, full-page capture, and comparison defaults.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use visual_checkpoint::MatchOptions;
//! use visual_checkpoint::checkpoint::{ImageMatchSettings, MatchLevel};
//!
//! let options = MatchOptions::new()
//!     .with_default_retry_timeout(Duration::from_secs(5))
//!     .with_force_full_page_screenshot()
//!     .with_match_settings(ImageMatchSettings::new(MatchLevel::Layout));
//!
//! assert!(options.validate().is_ok());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::checkpoint::{ImageMatchSettings, MATCH_INTERVAL, MINIMUM_MATCH_TIMEOUT, MatchLevel};
use crate::error::{Error, Result};
use crate::screenshot::DebugScreenshots;

// ============================================================================
// Constants
// ============================================================================

/// Default retry timeout when a check does not specify one.
pub const DEFAULT_RETRY_TIMEOUT: Duration = Duration::from_secs(2);

/// Default settle delay before each viewport capture.
pub const DEFAULT_WAIT_BEFORE_SCREENSHOTS: Duration = Duration::from_millis(100);

// ============================================================================
// MatchOptions
// ============================================================================

/// Session-wide checkpoint settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOptions {
    /// Retry timeout used for [`RetryTimeout::Default`](crate::checkpoint::RetryTimeout::Default).
    pub default_retry_timeout: Duration,

    /// Pause between polling attempts.
    pub match_interval: Duration,

    /// Settle delay before each capture.
    pub wait_before_screenshots: Duration,

    /// Capture the whole page instead of the viewport.
    pub force_full_page_screenshot: bool,

    /// Comparison defaults applied to every attempt.
    pub default_match_settings: ImageMatchSettings,

    /// Where to dump screenshots, if anywhere.
    pub debug_screenshots: Option<DebugScreenshots>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl MatchOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_retry_timeout: DEFAULT_RETRY_TIMEOUT,
            match_interval: MATCH_INTERVAL,
            wait_before_screenshots: DEFAULT_WAIT_BEFORE_SCREENSHOTS,
            force_full_page_screenshot: false,
            default_match_settings: ImageMatchSettings::new(MatchLevel::Strict),
            debug_screenshots: None,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl MatchOptions {
    /// Sets the default retry timeout.
    #[inline]
    #[must_use]
    pub fn with_default_retry_timeout(mut self, timeout: Duration) -> Self {
        self.default_retry_timeout = timeout;
        self
    }

    /// Sets the polling interval.
    #[inline]
    #[must_use]
    pub fn with_match_interval(mut self, interval: Duration) -> Self {
        self.match_interval = interval;
        self
    }

    /// Sets the settle delay before each capture.
    #[inline]
    #[must_use]
    pub fn with_wait_before_screenshots(mut self, wait: Duration) -> Self {
        self.wait_before_screenshots = wait;
        self
    }

    /// Enables full-page capture.
    #[inline]
    #[must_use]
    pub fn with_force_full_page_screenshot(mut self) -> Self {
        self.force_full_page_screenshot = true;
        self
    }

    /// Sets the comparison defaults.
    #[inline]
    #[must_use]
    pub fn with_match_settings(mut self, settings: ImageMatchSettings) -> Self {
        self.default_match_settings = settings;
        self
    }

    /// Enables debug screenshot dumps.
    #[inline]
    #[must_use]
    pub fn with_debug_screenshots(mut self, debug: DebugScreenshots) -> Self {
        self.debug_screenshots = Some(debug);
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl MatchOptions {
    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the default retry timeout is in
    /// (0, 60ms) or the match interval is zero.
    pub fn validate(&self) -> Result<()> {
        let timeout = self.default_retry_timeout;
        if !timeout.is_zero() && timeout < MINIMUM_MATCH_TIMEOUT {
            return Err(Error::config(format!(
                "Default match timeout must be at least 60ms, got {}ms",
                timeout.as_millis()
            )));
        }

        if self.match_interval.is_zero() {
            return Err(Error::config("Match interval must be greater than zero"));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
