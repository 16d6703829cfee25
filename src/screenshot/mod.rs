//! Screenshots and the capture interface.
//!
//! A [`Screenshot`] is a decoded image plus two pieces of placement data:
//! its origin on the top-level page and a snapshot of the frame chain that
//! was active when it was captured. Together they let regions given in the
//! active frame's coordinates be mapped onto the image.
//!
//! Capturing is done by a [`ScreenshotProvider`] supplied by the driver
//! layer. Cropping has default implementations on the trait.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `types` | [`Screenshot`] and [`CoordinatesType`] |
//! | `provider` | [`ScreenshotProvider`] trait |
//! | `debug` | [`DebugScreenshots`] file dumps |

// ============================================================================
// Submodules
// ============================================================================

mod debug;
mod provider;
mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use debug::{DebugScreenshots, PATH_ENV, PREFIX_ENV};
pub use provider::ScreenshotProvider;
pub use types::{CoordinatesType, Screenshot};
