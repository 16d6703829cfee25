//! Visual checkpoint matching client.
//!
//! This library captures a rendered page, region or element, packages the
//! image with its test metadata into a binary request, and submits it to a
//! remote comparator, retrying until the comparator reports a match or the
//! retry timeout elapses.
//!
//! # Architecture
//!
//! The client sits between a browser automation layer and a comparison
//! service:
//!
//! - **Screenshot provider**: the automation layer, behind [`ScreenshotProvider`]
//! - **Comparator**: the remote service, behind [`Comparator`]
//!
//! Key design principles:
//!
//! - Each checkpoint is single-flight: attempt N+1 is sent only after
//!   attempt N's response arrives
//! - Frame nesting is tracked by a [`FrameChain`]; every screenshot carries
//!   a snapshot of it
//! - Collaborators are passed through a [`MatchContext`], never globals
//! - Every wait is cancellable
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use visual_checkpoint::{
//!     Checkpoint, HttpComparator, MatchContext, MatchOptions, MatchWindowTask, Result,
//!     RunningSession, ScreenshotProvider, SessionId,
//! };
//!
//! async fn check(provider: Arc<dyn ScreenshotProvider>) -> Result<bool> {
//!     let comparator = HttpComparator::new("https://eyes.example.com", "api-key")?;
//!     let context = MatchContext::new(
//!         provider,
//!         Arc::new(comparator),
//!         RunningSession::new(SessionId::new("session-id")),
//!     );
//!
//!     let task = MatchWindowTask::new(context, MatchOptions::new())?;
//!     let result = task.match_window(&Checkpoint::new("home page")).await?;
//!     Ok(result.as_expected)
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`checkpoint`] | Retry engine, capture strategies, targets |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`frames`] | Frame coordinate stack |
//! | [`geometry`] | Points, sizes, regions |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`options`] | Session-wide configuration |
//! | [`protocol`] | Match request metadata and binary framing |
//! | [`screenshot`] | Screenshots and the provider trait |
//! | [`transport`] | Comparator trait and HTTP client |

// ============================================================================
// Modules
// ============================================================================

/// Checkpoint execution: retry engine, capture strategies, targets.
pub mod checkpoint;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Frame coordinate stack.
pub mod frames;

/// Points, sizes and regions.
pub mod geometry;

/// Type-safe identifiers.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Session-wide checkpoint configuration.
pub mod options;

/// Match request metadata and binary framing.
pub mod protocol;

/// Screenshots and the provider trait.
pub mod screenshot;

/// Comparator trait and HTTP client.
pub mod transport;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

// Checkpoint types
pub use checkpoint::{
    Checkpoint, MatchContext, MatchLevel, MatchResult, MatchWindowTask, RegionDescriptor,
    RetryTimeout, Target,
};

// Error types
pub use error::{Error, Result};

// Frame types
pub use frames::{Frame, FrameChain, FrameChainHandle, FrameReference};

// Geometry types
pub use geometry::{FloatingBounds, Point, Region, Size};

// Identifier types
pub use identifiers::{ElementId, SessionId};

// Configuration
pub use options::MatchOptions;

// Screenshot types
pub use screenshot::{Screenshot, ScreenshotProvider};

// Transport types
pub use transport::{Comparator, HttpComparator, RunningSession};
