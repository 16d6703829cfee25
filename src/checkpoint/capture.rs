//! Screenshot acquisition strategies.
//!
//! Every attempt of a checkpoint asks its [`CaptureStrategy`] for a fresh
//! screenshot. The three strategies share one acquisition primitive:
//!
//! | Strategy | Policy |
//! |----------|--------|
//! | [`WindowCapture`] | Full page if forced, else settle delay + viewport |
//! | [`RegionCapture`] | Window capture cropped to a region |
//! | [`ElementCapture`] | Stitched element capture, or viewport cropped to the element |

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::Result;
use crate::frames::FrameChainHandle;
use crate::geometry::Region;
use crate::identifiers::ElementId;
use crate::screenshot::{Screenshot, ScreenshotProvider};

use super::timing::{millis, sleep_cancellable};

// ============================================================================
// CaptureContext
// ============================================================================

/// Collaborators and settings available to a capture.
pub struct CaptureContext<'a> {
    /// Screenshot source.
    pub provider: &'a dyn ScreenshotProvider,
    /// Live frame chain; a snapshot is attached to every screenshot.
    pub frames: &'a FrameChainHandle,
    /// Cancels the settle delay.
    pub cancel: &'a CancellationToken,
    /// Capture the whole page instead of the viewport.
    pub force_full_page: bool,
    /// Settle delay before capturing.
    pub wait_before_screenshots: Duration,
}

impl CaptureContext<'_> {
    /// Captures the page: full page when forced, otherwise the viewport
    /// after the settle delay.
    ///
    /// # Errors
    ///
    /// Returns the provider's error, or [`Error::Cancelled`](crate::Error::Cancelled)
    /// if cancelled during the settle delay.
    pub async fn capture_window(&self) -> Result<Screenshot> {
        let screenshot = if self.force_full_page {
            self.provider.capture_full_page(self.wait_before_screenshots).await?
        } else {
            debug!(
                wait_ms = millis(self.wait_before_screenshots),
                "Waiting before taking screenshot"
            );
            sleep_cancellable(self.wait_before_screenshots, self.cancel).await?;
            debug!("Finished waiting");
            self.provider.capture_viewport().await?
        };
        Ok(self.stamp(screenshot))
    }

    /// Captures an element with stitching.
    ///
    /// # Errors
    ///
    /// Returns the provider's error.
    pub async fn capture_stitched(&self, element: &ElementId) -> Result<Screenshot> {
        let screenshot = self
            .provider
            .capture_stitched_element(element, self.wait_before_screenshots)
            .await?;
        Ok(self.stamp(screenshot))
    }

    fn stamp(&self, screenshot: Screenshot) -> Screenshot {
        screenshot.with_frame_chain(self.frames.snapshot())
    }
}

// ============================================================================
// CaptureStrategy
// ============================================================================

/// Produces the screenshot for one attempt.
#[async_trait]
pub trait CaptureStrategy: Send + Sync {
    /// Short name for logs.
    fn kind(&self) -> &'static str;

    /// Acquires a fresh screenshot.
    async fn capture(&self, ctx: &CaptureContext<'_>) -> Result<Screenshot>;
}

// ============================================================================
// Strategies
// ============================================================================

/// Captures the window.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowCapture;

#[async_trait]
impl CaptureStrategy for WindowCapture {
    fn kind(&self) -> &'static str {
        "window"
    }

    async fn capture(&self, ctx: &CaptureContext<'_>) -> Result<Screenshot> {
        ctx.capture_window().await
    }
}

/// Captures the window and crops to a region.
#[derive(Debug, Clone, Copy)]
pub struct RegionCapture {
    /// Region relative to the active frame's content.
    pub region: Region,
}

#[async_trait]
impl CaptureStrategy for RegionCapture {
    fn kind(&self) -> &'static str {
        "region"
    }

    async fn capture(&self, ctx: &CaptureContext<'_>) -> Result<Screenshot> {
        let screenshot = ctx.capture_window().await?;
        ctx.provider.crop_to_region(&screenshot, self.region).await
    }
}

/// Captures an element.
#[derive(Debug, Clone)]
pub struct ElementCapture {
    /// The element to capture.
    pub element: ElementId,
    /// Stitch the element when it exceeds the viewport.
    pub stitch_content: bool,
}

#[async_trait]
impl CaptureStrategy for ElementCapture {
    fn kind(&self) -> &'static str {
        "element"
    }

    async fn capture(&self, ctx: &CaptureContext<'_>) -> Result<Screenshot> {
        if self.stitch_content {
            return ctx.capture_stitched(&self.element).await;
        }

        let screenshot = ctx.capture_window().await?;
        ctx.provider.crop_to_element(&screenshot, &self.element).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::frames::{Frame, FrameReference};
    use crate::geometry::{Point, Size};
    use crate::testing::{Capture, MockProvider};

    fn context<'a>(
        provider: &'a MockProvider,
        frames: &'a FrameChainHandle,
        cancel: &'a CancellationToken,
        force_full_page: bool,
    ) -> CaptureContext<'a> {
        CaptureContext {
            provider,
            frames,
            cancel,
            force_full_page,
            wait_before_screenshots: Duration::from_millis(100),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_viewport_waits_first() {
        let provider = MockProvider::new(800, 600);
        let frames = FrameChainHandle::new();
        let cancel = CancellationToken::new();

        let start = tokio::time::Instant::now();
        WindowCapture
            .capture(&context(&provider, &frames, &cancel, false))
            .await
            .expect("capture");

        assert!(start.elapsed() >= Duration::from_millis(100));
        assert_eq!(provider.captures(), vec![Capture::Viewport]);
    }

    #[tokio::test]
    async fn test_window_forced_full_page() {
        let provider = MockProvider::new(800, 600);
        let frames = FrameChainHandle::new();
        let cancel = CancellationToken::new();

        WindowCapture
            .capture(&context(&provider, &frames, &cancel, true))
            .await
            .expect("capture");

        assert_eq!(provider.captures(), vec![Capture::FullPage]);
    }

    #[tokio::test]
    async fn test_region_crop_inside_frame() {
        let provider = MockProvider::new(800, 600);
        let frames = FrameChainHandle::new();
        frames.push(Frame::new(
            FrameReference::Name("content".into()),
            Point::new(50, 60),
            Size::new(500, 400),
            Size::new(485, 400),
            Point::new(0, 10),
        ));
        let cancel = CancellationToken::new();

        let shot = RegionCapture {
            region: Region::new(10, 10, 100, 80),
        }
        .capture(&context(&provider, &frames, &cancel, true))
        .await
        .expect("capture");

        assert_eq!(shot.image().dimensions(), (100, 80));
        assert_eq!(shot.origin(), Point::new(60, 70));
        assert_eq!(shot.frame_chain().len(), 1);
    }

    #[tokio::test]
    async fn test_element_without_stitching_crops_viewport() {
        let element = ElementId::new("card");
        let provider = MockProvider::new(800, 600)
            .with_element(element.clone(), Region::new(100, 100, 64, 32));
        let frames = FrameChainHandle::new();
        let cancel = CancellationToken::new();

        let shot = ElementCapture {
            element,
            stitch_content: false,
        }
        .capture(&CaptureContext {
            wait_before_screenshots: Duration::ZERO,
            ..context(&provider, &frames, &cancel, false)
        })
        .await
        .expect("capture");

        assert_eq!(shot.image().dimensions(), (64, 32));
        assert_eq!(provider.captures(), vec![Capture::Viewport]);
    }

    #[tokio::test]
    async fn test_element_with_stitching() {
        let element = ElementId::new("long-table");
        let provider =
            MockProvider::new(800, 600).with_element(element.clone(), Region::new(0, 0, 800, 2400));
        let frames = FrameChainHandle::new();
        let cancel = CancellationToken::new();

        let shot = ElementCapture {
            element: element.clone(),
            stitch_content: true,
        }
        .capture(&context(&provider, &frames, &cancel, false))
        .await
        .expect("capture");

        assert_eq!(shot.image().dimensions(), (800, 2400));
        assert_eq!(provider.captures(), vec![Capture::Stitched(element)]);
    }

    #[tokio::test]
    async fn test_cancelled_during_settle_delay() {
        let provider = MockProvider::new(800, 600);
        let frames = FrameChainHandle::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = WindowCapture
            .capture(&context(&provider, &frames, &cancel, false))
            .await
            .unwrap_err();

        assert!(matches!(err, crate::Error::Cancelled));
        assert!(provider.captures().is_empty());
    }
}
