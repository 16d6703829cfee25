//! Retry timeout selection and cancellable waits.

use std::fmt;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Smallest non-zero retry timeout accepted.
pub const MINIMUM_MATCH_TIMEOUT: Duration = Duration::from_millis(60);

/// Pause between polling attempts.
pub const MATCH_INTERVAL: Duration = Duration::from_millis(500);

// ============================================================================
// RetryTimeout
// ============================================================================

/// How long a checkpoint keeps retrying before its final attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryTimeout {
    /// Use the configured default timeout.
    #[default]
    Default,
    /// Explicit timeout in milliseconds. `0` means a single attempt.
    Millis(u64),
}

impl RetryTimeout {
    /// Maps a signed millisecond value: negative selects the default.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        u64::try_from(millis).map_or(Self::Default, Self::Millis)
    }

    /// Resolves to an effective duration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an explicit timeout in (0, 60ms).
    pub fn resolve(self, default: Duration) -> Result<Duration> {
        match self {
            Self::Default => Ok(default),
            Self::Millis(millis) => {
                let timeout = Duration::from_millis(millis);
                if !timeout.is_zero() && timeout < MINIMUM_MATCH_TIMEOUT {
                    return Err(Error::config(format!(
                        "Match timeout must be at least 60ms, got {}ms instead",
                        millis
                    )));
                }
                Ok(timeout)
            }
        }
    }
}

impl From<Duration> for RetryTimeout {
    fn from(duration: Duration) -> Self {
        Self::Millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for RetryTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Millis(millis) => write!(f, "{millis}ms"),
        }
    }
}

// ============================================================================
// Waiting
// ============================================================================

/// Sleeps for `duration` unless `cancel` fires first.
///
/// # Errors
///
/// Returns [`Error::Cancelled`] if the token is cancelled before the sleep
/// completes.
pub(crate) async fn sleep_cancellable(
    duration: Duration,
    cancel: &CancellationToken,
) -> Result<()> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::Cancelled),
        () = tokio::time::sleep(duration) => Ok(()),
    }
}

/// Milliseconds of `duration` for log fields, saturating at `u64::MAX`.
#[inline]
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// Tests
// ============================================================================
