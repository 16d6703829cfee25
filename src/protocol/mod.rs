//! Match request wire format.
//!
//! Each attempt of a checkpoint is sent to the comparator as one binary body:
//!
//! ```text
//! [4 bytes: big-endian u32 = N] [N bytes: UTF-8 JSON metadata] [image bytes]
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `match_data` | JSON metadata model ([`MatchData`]) |
//! | `request` | Binary framing ([`MatchRequest`]) |

// ============================================================================
// Submodules
// ============================================================================

/// JSON metadata sent with every attempt.
pub mod match_data;

/// Binary framing of metadata and image.
pub mod request;

// ============================================================================
// Re-exports
// ============================================================================

pub use match_data::{AppOutput, MatchData, MouseAction, UserInput};
pub use request::{FramedBody, LENGTH_PREFIX_SIZE, MatchRequest};
