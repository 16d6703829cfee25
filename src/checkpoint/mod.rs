//! Checkpoint execution.
//!
//! A checkpoint captures the page, packages the image with its metadata,
//! and asks the comparator whether it matches the baseline, retrying while
//! the page may still be settling.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use visual_checkpoint::checkpoint::{Checkpoint, MatchContext, MatchWindowTask};
//! use visual_checkpoint::screenshot::ScreenshotProvider;
//! use visual_checkpoint::transport::{HttpComparator, RunningSession};
//! use visual_checkpoint::{MatchOptions, Result, SessionId};
//!
//! # async fn example(provider: Arc<dyn ScreenshotProvider>) -> Result<()> {
//! let comparator = HttpComparator::new("https://eyes.example.com", "api-key")?;
//! let session = RunningSession::new(SessionId::new("session-id"));
//! let context = MatchContext::new(provider, Arc::new(comparator), session);
//! let task = MatchWindowTask::new(context, MatchOptions::new())?;
//!
//! let checkpoint = Checkpoint::new("home page").with_retry_timeout(Duration::from_secs(5));
//! let result = task.match_window(&checkpoint).await?;
//! println!("as expected: {}", result.as_expected);
//! # Ok(())
//! # }
//! ```
//!
//! # Components
//!
//! | Module | Description |
//! |--------|-------------|
//! | `task` | [`MatchWindowTask`] retry engine |
//! | `capture` | [`CaptureStrategy`] implementations |
//! | `target` | [`Target`] and region descriptors |
//! | `regions` | Per-attempt region resolution |
//! | `timing` | [`RetryTimeout`] and cancellable waits |
//! | `settings` | [`MatchLevel`] and comparison thresholds |

// ============================================================================
// Submodules
// ============================================================================

mod capture;
mod regions;
mod settings;
mod target;
mod task;
mod timing;

// ============================================================================
// Re-exports
// ============================================================================

pub use capture::{CaptureContext, CaptureStrategy, ElementCapture, RegionCapture, WindowCapture};
pub use regions::{DynamicRegions, resolve_dynamic_regions};
pub use settings::{ExactMatchSettings, ImageMatchSettings, MatchLevel};
pub use target::{FloatingDescriptor, RegionDescriptor, RegionResolver, Target};
pub use task::{Checkpoint, MatchContext, MatchResult, MatchWindowTask};
pub use timing::{MATCH_INTERVAL, MINIMUM_MATCH_TIMEOUT, RetryTimeout};
