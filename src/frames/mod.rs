//! Frame coordinate stack.
//!
//! Tracks the iframe nesting path of the current browsing context so that
//! anything captured inside nested frames can be placed on the top-level
//! page.
//!
//! The stack never navigates by itself: the driver layer pushes a [`Frame`]
//! when it enters an iframe and pops it when it leaves. The chain only
//! accumulates offsets.
//!
//! # Example
//!
//! ```
//! use visual_checkpoint::frames::{Frame, FrameChain, FrameReference};
//! use visual_checkpoint::geometry::{Point, Size};
//!
//! let mut chain = FrameChain::new();
//! chain.push(Frame::new(
//!     FrameReference::Index(0),
//!     Point::new(10, 20),
//!     Size::new(400, 300),
//!     Size::new(385, 300),
//!     Point::new(0, 120),
//! ));
//!
//! assert_eq!(chain.current_offset(), Point::new(10, 20));
//! assert_eq!(chain.default_content_scroll_position().unwrap(), Point::new(0, 120));
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `frame` | [`Frame`] descriptor and [`FrameReference`] |
//! | `chain` | [`FrameChain`] and the shared [`FrameChainHandle`] |

// ============================================================================
// Submodules
// ============================================================================

mod chain;
mod frame;

// ============================================================================
// Re-exports
// ============================================================================

pub use chain::{FrameChain, FrameChainHandle};
pub use frame::{Frame, FrameReference};
