//! Frame chain and its shared live handle.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::slice;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::error::{Error, Result};
use crate::geometry::{Point, Size};

use super::Frame;

// ============================================================================
// FrameChain
// ============================================================================

/// Ordered iframe nesting path, outermost frame first.
///
/// Equality is order-sensitive: two chains are equal only if they hold the
/// same frames in the same nesting order. Order determines every offset
/// computed from the chain.
///
/// `Clone` is a deep copy, so a cloned chain is a stable snapshot that is
/// unaffected by later `push`/`pop` on the original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameChain {
    frames: Vec<Frame>,
}

impl FrameChain {
    /// Creates an empty chain (top-level document).
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the nesting depth.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when the top-level document is active.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterates frames from outermost to innermost.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Returns the innermost (active) frame.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Enters a nested frame.
    pub fn push(&mut self, frame: Frame) {
        trace!(depth = self.frames.len() + 1, %frame, "Frame pushed");
        self.frames.push(frame);
    }

    /// Leaves the innermost frame and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the chain is empty. Leaving the top-level document is a
    /// bug in the caller's frame bookkeeping; use [`try_pop`](Self::try_pop)
    /// when emptiness is expected.
    #[track_caller]
    pub fn pop(&mut self) -> Frame {
        match self.try_pop() {
            Some(frame) => frame,
            None => panic!("pop on an empty frame chain"),
        }
    }

    /// Leaves the innermost frame, or returns `None` at the top level.
    pub fn try_pop(&mut self) -> Option<Frame> {
        let frame = self.frames.pop();
        if let Some(frame) = &frame {
            trace!(depth = self.frames.len(), %frame, "Frame popped");
        }
        frame
    }

    /// Removes every frame.
    #[inline]
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Absolute page offset of the active frame's content.
    ///
    /// Sum of every frame's location, outermost first. The top-level
    /// document has offset `(0, 0)`.
    #[must_use]
    pub fn current_offset(&self) -> Point {
        self.frames
            .iter()
            .fold(Point::top_left(), |offset, frame| offset.offset(frame.location()))
    }

    /// Content-area size of the active frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFrames`] if the chain is empty.
    pub fn current_size(&self) -> Result<Size> {
        self.peek().map(Frame::inner_size).ok_or(Error::NoFrames)
    }

    /// Top-level document scroll position saved when the outermost frame
    /// was entered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFrames`] if the chain is empty.
    pub fn default_content_scroll_position(&self) -> Result<Point> {
        self.frames
            .first()
            .map(Frame::original_location)
            .ok_or(Error::NoFrames)
    }
}

impl<'a> IntoIterator for &'a FrameChain {
    type Item = &'a Frame;
    type IntoIter = slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for FrameChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameChain with {} frames", self.frames.len())
    }
}

// ============================================================================
// FrameChainHandle
// ============================================================================

/// Shared handle to the live frame chain of one browsing session.
///
/// The driver layer mutates it as it switches frames; the checkpoint engine
/// takes [`snapshot`](Self::snapshot)s so captures in progress are not
/// affected by later navigation. A session has a single writer at a time.
#[derive(Clone, Default)]
pub struct FrameChainHandle {
    inner: Arc<Mutex<FrameChain>>,
}

impl fmt::Debug for FrameChainHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameChainHandle")
            .field("depth", &self.inner.lock().len())
            .finish_non_exhaustive()
    }
}

impl FrameChainHandle {
    /// Creates a handle around an empty chain.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a nested frame.
    pub fn push(&self, frame: Frame) {
        self.inner.lock().push(frame);
    }

    /// Leaves the innermost frame.
    ///
    /// # Panics
    ///
    /// Panics if the chain is empty.
    #[track_caller]
    pub fn pop(&self) -> Frame {
        self.inner.lock().pop()
    }

    /// Leaves the innermost frame, or returns `None` at the top level.
    pub fn try_pop(&self) -> Option<Frame> {
        self.inner.lock().try_pop()
    }

    /// Returns to the top-level document.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Returns the nesting depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` when the top-level document is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Absolute page offset of the active frame's content.
    #[must_use]
    pub fn current_offset(&self) -> Point {
        self.inner.lock().current_offset()
    }

    /// Returns a deep copy of the current chain.
    #[must_use]
    pub fn snapshot(&self) -> FrameChain {
        self.inner.lock().clone()
    }
}

impl From<FrameChain> for FrameChainHandle {
    fn from(chain: FrameChain) -> Self {
        Self {
            inner: Arc::new(Mutex::new(chain)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
