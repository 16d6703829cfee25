//! Per-check target settings and region descriptors.
//!
//! A [`Target`] lists the regions the comparator should ignore or treat as
//! floating. Descriptors are resolved against each fresh screenshot, so
//! element-based regions follow the element between attempts.
//!
//! # Example
//!
//! ```ignore
//! let target = Target::new()
//!     .ignore(RegionDescriptor::rectangle(Region::new(0, 0, 200, 40)))
//!     .ignore(RegionDescriptor::element(clock_id))
//!     .floating(RegionDescriptor::element(banner_id), FloatingBounds::uniform(10))
//!     .ignore_caret(true);
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::geometry::{FloatingBounds, FloatingRegion, Region};
use crate::identifiers::ElementId;
use crate::screenshot::{CoordinatesType, Screenshot, ScreenshotProvider};

// ============================================================================
// RegionResolver
// ============================================================================

/// Custom region resolution.
///
/// Implementations return the region in screenshot coordinates, or
/// [`Error::OutOfBounds`](crate::Error::OutOfBounds) when it misses the
/// screenshot.
#[async_trait]
pub trait RegionResolver: Send + Sync + fmt::Debug {
    /// Resolves the region for the given screenshot.
    async fn resolve(
        &self,
        provider: &dyn ScreenshotProvider,
        screenshot: &Screenshot,
    ) -> Result<Region>;
}

// ============================================================================
// RegionDescriptor
// ============================================================================

/// Describes a region to be resolved against each screenshot.
#[derive(Debug, Clone)]
pub enum RegionDescriptor {
    /// Fixed rectangle in screenshot coordinates.
    Rectangle(Region),
    /// Bounds of an element.
    Element(ElementId),
    /// Caller-defined resolution.
    Custom(Arc<dyn RegionResolver>),
}

impl RegionDescriptor {
    /// Describes a fixed rectangle.
    #[inline]
    #[must_use]
    pub fn rectangle(region: Region) -> Self {
        Self::Rectangle(region)
    }

    /// Describes an element's bounds.
    #[inline]
    #[must_use]
    pub fn element(element: ElementId) -> Self {
        Self::Element(element)
    }

    /// Wraps a custom resolver.
    #[inline]
    #[must_use]
    pub fn custom(resolver: impl RegionResolver + 'static) -> Self {
        Self::Custom(Arc::new(resolver))
    }

    /// Resolves to a region in screenshot coordinates, clipped to the
    /// screenshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`](crate::Error::OutOfBounds) if the
    /// region does not intersect the screenshot, or the provider's error if
    /// an element cannot be located.
    pub async fn resolve(
        &self,
        provider: &dyn ScreenshotProvider,
        screenshot: &Screenshot,
    ) -> Result<Region> {
        match self {
            Self::Rectangle(region) => {
                screenshot.intersected_region(*region, CoordinatesType::ScreenshotAsIs)
            }
            Self::Element(element) => {
                let bounds = provider.element_bounds(element).await?;
                screenshot.intersected_region(bounds, CoordinatesType::ContextRelative)
            }
            Self::Custom(resolver) => resolver.resolve(provider, screenshot).await,
        }
    }
}

impl fmt::Display for RegionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rectangle(region) => write!(f, "rectangle {region}"),
            Self::Element(element) => write!(f, "element {element}"),
            Self::Custom(resolver) => write!(f, "custom {resolver:?}"),
        }
    }
}

// ============================================================================
// FloatingDescriptor
// ============================================================================

/// A region descriptor plus the drift it may show.
#[derive(Debug, Clone)]
pub struct FloatingDescriptor {
    /// Where the floating content is.
    pub region: RegionDescriptor,
    /// How far it may move.
    pub bounds: FloatingBounds,
}

impl FloatingDescriptor {
    /// Resolves to a floating region in screenshot coordinates.
    ///
    /// # Errors
    ///
    /// Same as [`RegionDescriptor::resolve`].
    pub async fn resolve(
        &self,
        provider: &dyn ScreenshotProvider,
        screenshot: &Screenshot,
    ) -> Result<FloatingRegion> {
        let region = self.region.resolve(provider, screenshot).await?;
        Ok(FloatingRegion {
            region,
            bounds: self.bounds,
        })
    }
}

// ============================================================================
// Target
// ============================================================================

/// What a single check should ignore or allow to float.
#[derive(Debug, Clone, Default)]
pub struct Target {
    ignore_caret: bool,
    ignore: Vec<RegionDescriptor>,
    floating: Vec<FloatingDescriptor>,
}

impl Target {
    /// Creates a target with no regions.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an ignore region.
    #[must_use]
    pub fn ignore(mut self, region: RegionDescriptor) -> Self {
        self.ignore.push(region);
        self
    }

    /// Adds a floating region.
    #[must_use]
    pub fn floating(mut self, region: RegionDescriptor, bounds: FloatingBounds) -> Self {
        self.floating.push(FloatingDescriptor { region, bounds });
        self
    }

    /// Sets whether text carets are ignored.
    #[must_use]
    pub fn ignore_caret(mut self, ignore_caret: bool) -> Self {
        self.ignore_caret = ignore_caret;
        self
    }

    /// Returns whether text carets are ignored.
    #[inline]
    #[must_use]
    pub fn ignores_caret(&self) -> bool {
        self.ignore_caret
    }

    /// Returns the ignore region descriptors.
    #[inline]
    #[must_use]
    pub fn ignore_regions(&self) -> &[RegionDescriptor] {
        &self.ignore
    }

    /// Returns the floating region descriptors.
    #[inline]
    #[must_use]
    pub fn floating_regions(&self) -> &[FloatingDescriptor] {
        &self.floating
    }
}
