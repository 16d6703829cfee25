//! Dynamic region resolution.

use tracing::warn;

use crate::error::Result;
use crate::geometry::{FloatingRegion, Region};
use crate::screenshot::{Screenshot, ScreenshotProvider};

use super::Target;

// ============================================================================
// DynamicRegions
// ============================================================================

/// Ignore and floating regions resolved against one screenshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicRegions {
    /// Ignore regions in screenshot coordinates.
    pub ignore: Vec<Region>,
    /// Floating regions in screenshot coordinates.
    pub floating: Vec<FloatingRegion>,
}

/// Resolves every region of `target` against `screenshot`.
///
/// A region that falls outside the screenshot is dropped with a warning;
/// the remaining regions are kept.
///
/// # Errors
///
/// Any error other than [`Error::OutOfBounds`](crate::Error::OutOfBounds)
/// is returned and aborts the attempt.
pub async fn resolve_dynamic_regions(
    target: &Target,
    provider: &dyn ScreenshotProvider,
    screenshot: &Screenshot,
) -> Result<DynamicRegions> {
    let mut regions = DynamicRegions::default();

    for descriptor in target.ignore_regions() {
        match descriptor.resolve(provider, screenshot).await {
            Ok(region) => regions.ignore.push(region),
            Err(err) if err.is_out_of_bounds() => {
                warn!(
                    region = %descriptor,
                    error = %err,
                    "Ignore region is out of bounds, skipping"
                );
            }
            Err(err) => return Err(err),
        }
    }

    for descriptor in target.floating_regions() {
        match descriptor.resolve(provider, screenshot).await {
            Ok(region) => regions.floating.push(region),
            Err(err) if err.is_out_of_bounds() => {
                warn!(
                    region = %descriptor.region,
                    error = %err,
                    "Floating region is out of bounds, skipping"
                );
            }
            Err(err) => return Err(err),
        }
    }

    Ok(regions)
}

// ============================================================================
// Tests
// ============================================================================
