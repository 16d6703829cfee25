//! Screenshot provider interface.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::geometry::Region;
use crate::identifiers::ElementId;

use super::{CoordinatesType, Screenshot};

// ============================================================================
// ScreenshotProvider
// ============================================================================

/// Capture operations supplied by the browser automation layer.
///
/// Implementations return screenshots with their page `origin` set. Element
/// bounds are reported relative to the active frame's content
/// ([`CoordinatesType::ContextRelative`]); the frame chain attached to each
/// screenshot maps them onto the page.
///
/// # Example
///
/// ```ignore
/// struct TabProvider { tab: Tab }
///
/// #[async_trait]
/// impl ScreenshotProvider for TabProvider {
///     async fn capture_viewport(&self) -> Result<Screenshot> {
///         let data = self.tab.capture_screenshot().await?;
///         let (x, y) = self.tab.get_scroll_position().await?;
///         Ok(Screenshot::from_base64(&data)?.with_origin(Point::new(x, y)))
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait ScreenshotProvider: Send + Sync {
    /// Returns the title of the page under test.
    async fn title(&self) -> Result<String>;

    /// Captures the visible viewport.
    ///
    /// The caller has already waited for the page to settle.
    async fn capture_viewport(&self) -> Result<Screenshot>;

    /// Captures the whole page, stitching viewport captures as needed.
    ///
    /// `wait` is the settle delay before each partial capture.
    async fn capture_full_page(&self, wait: Duration) -> Result<Screenshot>;

    /// Captures an element, stitching when it exceeds the viewport.
    async fn capture_stitched_element(
        &self,
        element: &ElementId,
        wait: Duration,
    ) -> Result<Screenshot>;

    /// Returns an element's bounds relative to the active frame's content.
    async fn element_bounds(&self, element: &ElementId) -> Result<Region>;

    /// Crops a screenshot to a context-relative region.
    async fn crop_to_region(&self, screenshot: &Screenshot, region: Region) -> Result<Screenshot> {
        screenshot.sub_screenshot(region, CoordinatesType::ContextRelative)
    }

    /// Crops a screenshot to an element's bounds.
    async fn crop_to_element(
        &self,
        screenshot: &Screenshot,
        element: &ElementId,
    ) -> Result<Screenshot> {
        let bounds = self.element_bounds(element).await?;
        screenshot.sub_screenshot(bounds, CoordinatesType::ContextRelative)
    }
}
