//! Frame descriptor.

use std::fmt;

use crate::geometry::{Point, Size};
use crate::identifiers::ElementId;

// ============================================================================
// FrameReference
// ============================================================================

/// Handle the driver uses to re-enter a frame.
///
/// Opaque to this crate; it is only stored and handed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameReference {
    /// The iframe element itself.
    Element(ElementId),
    /// Zero-based index among the parent's child frames.
    Index(usize),
    /// The frame's `name` or `id` attribute.
    Name(String),
}

impl fmt::Display for FrameReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(id) => write!(f, "element {id}"),
            Self::Index(index) => write!(f, "index {index}"),
            Self::Name(name) => write!(f, "name {name:?}"),
        }
    }
}

// ============================================================================
// Frame
// ============================================================================

/// One entry of the frame chain.
///
/// A frame is immutable: changing its geometry means popping it and
/// pushing a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    reference: FrameReference,
    location: Point,
    outer_size: Size,
    inner_size: Size,
    original_location: Point,
}

impl Frame {
    /// Creates a frame descriptor.
    ///
    /// # Arguments
    ///
    /// * `reference` - Driver handle for re-entering the frame
    /// * `location` - Frame element position in its parent's viewport
    /// * `outer_size` - Frame element bounding box
    /// * `inner_size` - Frame content area (excludes borders and scrollbars)
    /// * `original_location` - Parent scroll offset when the frame was entered
    #[must_use]
    pub fn new(
        reference: FrameReference,
        location: Point,
        outer_size: Size,
        inner_size: Size,
        original_location: Point,
    ) -> Self {
        Self {
            reference,
            location,
            outer_size,
            inner_size,
            original_location,
        }
    }

    /// Returns the driver handle.
    #[inline]
    #[must_use]
    pub fn reference(&self) -> &FrameReference {
        &self.reference
    }

    /// Returns the position relative to the parent frame's viewport.
    #[inline]
    #[must_use]
    pub fn location(&self) -> Point {
        self.location
    }

    /// Returns the frame element's bounding box size.
    #[inline]
    #[must_use]
    pub fn outer_size(&self) -> Size {
        self.outer_size
    }

    /// Returns the content area size.
    #[inline]
    #[must_use]
    pub fn inner_size(&self) -> Size {
        self.inner_size
    }

    /// Returns the parent's scroll offset captured on entry.
    #[inline]
    #[must_use]
    pub fn original_location(&self) -> Point {
        self.original_location
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({}) at {}", self.reference, self.location)
    }
}
