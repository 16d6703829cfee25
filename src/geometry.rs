//! Integer geometry: points, sizes, and rectangular regions.
//!
//! Coordinates are CSS pixels. `x`/`left` grow to the right and `y`/`top`
//! grow downwards. Regions serialize with the `left`/`top`/`width`/`height`
//! keys the comparator expects.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

// ============================================================================
// Point
// ============================================================================

/// A location in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin `(0, 0)`.
    #[inline]
    #[must_use]
    pub const fn top_left() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Returns this point moved by `delta`, saturating at the `i32` range.
    #[inline]
    #[must_use]
    pub const fn offset(self, delta: Point) -> Self {
        Self {
            x: self.x.saturating_add(delta.x),
            y: self.y.saturating_add(delta.y),
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        self.offset(rhs)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        self.offset(-rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(self.x.saturating_neg(), self.y.saturating_neg())
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ============================================================================
// Size
// ============================================================================

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Creates a size.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero or negative.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ============================================================================
// Region
// ============================================================================

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Region {
    /// Creates a region from its edges and dimensions.
    #[inline]
    #[must_use]
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Creates a region from a location and a size.
    #[inline]
    #[must_use]
    pub const fn from_parts(location: Point, size: Size) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    /// Returns the top-left corner.
    #[inline]
    #[must_use]
    pub const fn location(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Returns the dimensions.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge, saturating at `i32::MAX`.
    #[inline]
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `i32::MAX`.
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    /// Returns `true` if the region covers no pixels.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Returns this region moved by `delta`.
    #[inline]
    #[must_use]
    pub const fn offset(self, delta: Point) -> Self {
        Self::from_parts(self.location().offset(delta), self.size())
    }

    /// Returns `true` if `other` lies entirely inside this region.
    #[must_use]
    pub fn contains(&self, other: &Region) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns the overlapping part of two regions, if any pixels overlap.
    #[must_use]
    pub fn intersection(&self, other: &Region) -> Option<Region> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        let width = right.saturating_sub(left);
        let height = bottom.saturating_sub(top);

        let region = Region::new(left, top, width, height);
        (!region.is_empty()).then_some(region)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.location(), self.size())
    }
}

// ============================================================================
// Floating Regions
// ============================================================================

/// How far a floating region may drift from its position and still match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatingBounds {
    /// Maximum upward drift.
    pub max_up_offset: i32,
    /// Maximum downward drift.
    pub max_down_offset: i32,
    /// Maximum drift to the left.
    pub max_left_offset: i32,
    /// Maximum drift to the right.
    pub max_right_offset: i32,
}

impl FloatingBounds {
    /// Creates bounds with the same offset in every direction.
    #[inline]
    #[must_use]
    pub const fn uniform(offset: i32) -> Self {
        Self {
            max_up_offset: offset,
            max_down_offset: offset,
            max_left_offset: offset,
            max_right_offset: offset,
        }
    }
}

/// A resolved floating region: a rectangle plus its drift bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatingRegion {
    /// The rectangle, in screenshot coordinates.
    #[serde(flatten)]
    pub region: Region,
    /// Allowed drift.
    #[serde(flatten)]
    pub bounds: FloatingBounds,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(10, 20);
        let b = Point::new(5, -3);
        assert_eq!(a + b, Point::new(15, 17));
        assert_eq!(a - b, Point::new(5, 23));
        assert_eq!(Point::from((1, 2)), Point::new(1, 2));
    }

    #[test]
    fn test_region_edges() {
        let region = Region::new(10, 20, 30, 40);
        assert_eq!(region.right(), 40);
        assert_eq!(region.bottom(), 60);
        assert_eq!(region.location(), Point::new(10, 20));
        assert_eq!(region.size(), Size::new(30, 40));
    }

    #[test]
    fn test_region_intersection() {
        let bounds = Region::new(0, 0, 100, 100);
        let partial = Region::new(80, 90, 50, 50);
        assert_eq!(bounds.intersection(&partial), Some(Region::new(80, 90, 20, 10)));

        let outside = Region::new(100, 0, 10, 10);
        assert_eq!(bounds.intersection(&outside), None);
    }

    #[test]
    fn test_extreme_coordinates_saturate() {
        let far = Region::new(i32::MAX - 5, i32::MIN, 100, 100);
        assert_eq!(far.right(), i32::MAX);
        assert_eq!(far.bottom(), i32::MIN + 100);
        assert_eq!(Region::new(0, 0, 800, 600).intersection(&far), None);

        let moved = Point::new(i32::MAX, 0).offset(Point::new(10, 0));
        assert_eq!(moved, Point::new(i32::MAX, 0));
        assert_eq!(-Point::new(i32::MIN, 0), Point::new(i32::MAX, 0));
    }

    #[test]
    fn test_region_contains() {
        let bounds = Region::new(0, 0, 100, 100);
        assert!(bounds.contains(&Region::new(0, 0, 100, 100)));
        assert!(!bounds.contains(&Region::new(1, 0, 100, 100)));
    }

    #[test]
    fn test_region_serializes_with_comparator_keys() {
        let json = serde_json::to_value(Region::new(1, 2, 3, 4)).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"left": 1, "top": 2, "width": 3, "height": 4})
        );
    }

    #[test]
    fn test_floating_region_flattens_bounds() {
        let floating = FloatingRegion {
            region: Region::new(5, 6, 7, 8),
            bounds: FloatingBounds {
                max_up_offset: 1,
                max_down_offset: 2,
                max_left_offset: 3,
                max_right_offset: 4,
            },
        };
        let json = serde_json::to_value(floating).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "left": 5, "top": 6, "width": 7, "height": 8,
                "maxUpOffset": 1, "maxDownOffset": 2,
                "maxLeftOffset": 3, "maxRightOffset": 4
            })
        );
    }
}
