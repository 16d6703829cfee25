//! Screenshot image with page placement.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use image::{ImageFormat, RgbaImage, imageops};
use tracing::trace;

use crate::error::{Error, Result};
use crate::frames::FrameChain;
use crate::geometry::{Point, Region};

// ============================================================================
// CoordinatesType
// ============================================================================

/// Coordinate space a region is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatesType {
    /// Pixel coordinates of the screenshot image itself.
    ScreenshotAsIs,
    /// Relative to the active frame's content, as reported by the driver.
    ContextRelative,
    /// Absolute top-level page coordinates.
    Page,
}

// ============================================================================
// Screenshot
// ============================================================================

/// A captured image and where it sits on the page.
///
/// `origin` is the page position of the image's top-left pixel: the scroll
/// position for a viewport capture, `(0, 0)` for a full-page capture, and the
/// cropped area's position for sub-screenshots.
#[derive(Clone)]
pub struct Screenshot {
    image: RgbaImage,
    origin: Point,
    frame_chain: FrameChain,
}

impl fmt::Debug for Screenshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screenshot")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("origin", &self.origin)
            .field("frame_depth", &self.frame_chain.len())
            .finish()
    }
}

// ============================================================================
// Screenshot - Constructors
// ============================================================================

impl Screenshot {
    /// Wraps a decoded image placed at the page origin.
    #[must_use]
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            origin: Point::top_left(),
            frame_chain: FrameChain::new(),
        }
    }

    /// Decodes an encoded image (PNG or JPEG).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if the data cannot be decoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self::new(image))
    }

    /// Decodes base64 image data as returned by WebDriver screenshot
    /// commands.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Screenshot`] for invalid base64 and
    /// [`Error::Image`] for undecodable image data.
    pub fn from_base64(data: &str) -> Result<Self> {
        let bytes = Base64Standard
            .decode(data.trim())
            .map_err(|e| Error::screenshot(format!("Failed to decode base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Sets the page position of the top-left pixel.
    #[inline]
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Attaches the frame chain that was active at capture time.
    #[inline]
    #[must_use]
    pub fn with_frame_chain(mut self, frame_chain: FrameChain) -> Self {
        self.frame_chain = frame_chain;
        self
    }
}

// ============================================================================
// Screenshot - Accessors
// ============================================================================

impl Screenshot {
    /// Returns the decoded image.
    #[inline]
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Returns the page position of the top-left pixel.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the frame chain snapshot taken at capture time.
    #[inline]
    #[must_use]
    pub fn frame_chain(&self) -> &FrameChain {
        &self.frame_chain
    }

    /// Image bounds in screenshot coordinates.
    #[must_use]
    pub fn bounds(&self) -> Region {
        Region::new(0, 0, self.image.width() as i32, self.image.height() as i32)
    }
}

// ============================================================================
// Screenshot - Coordinates
// ============================================================================

impl Screenshot {
    /// Converts a region between coordinate spaces.
    ///
    /// Context-relative regions are lifted to the page by the frame chain
    /// offset; page regions are mapped to the image by subtracting the
    /// origin.
    #[must_use]
    pub fn convert_region(
        &self,
        region: Region,
        from: CoordinatesType,
        to: CoordinatesType,
    ) -> Region {
        let frame_offset = self.frame_chain.current_offset();

        let page = match from {
            CoordinatesType::Page => region,
            CoordinatesType::ContextRelative => region.offset(frame_offset),
            CoordinatesType::ScreenshotAsIs => region.offset(self.origin),
        };

        match to {
            CoordinatesType::Page => page,
            CoordinatesType::ContextRelative => page.offset(-frame_offset),
            CoordinatesType::ScreenshotAsIs => page.offset(-self.origin),
        }
    }

    /// Maps a region onto the image and clips it to the image bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if no pixel of the region is inside
    /// the screenshot.
    pub fn intersected_region(&self, region: Region, from: CoordinatesType) -> Result<Region> {
        let converted = self.convert_region(region, from, CoordinatesType::ScreenshotAsIs);
        let bounds = self.bounds();
        bounds
            .intersection(&converted)
            .ok_or_else(|| Error::out_of_bounds(converted, bounds))
    }

    /// Crops the screenshot to a region.
    ///
    /// The result keeps the frame chain and has its origin moved to the
    /// cropped area.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the region misses the screenshot.
    pub fn sub_screenshot(&self, region: Region, from: CoordinatesType) -> Result<Screenshot> {
        let area = self.intersected_region(region, from)?;
        trace!(region = %region, area = %area, "Cropping screenshot");

        let image = imageops::crop_imm(
            &self.image,
            area.left as u32,
            area.top as u32,
            area.width as u32,
            area.height as u32,
        )
        .to_image();

        Ok(Screenshot {
            image,
            origin: self.origin.offset(area.location()),
            frame_chain: self.frame_chain.clone(),
        })
    }
}

// ============================================================================
// Screenshot - Encoding
// ============================================================================

impl Screenshot {
    /// Encodes the image as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if encoding fails.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Saves the image as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if the file cannot be written.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image
            .save_with_format(path.as_ref(), ImageFormat::Png)?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
