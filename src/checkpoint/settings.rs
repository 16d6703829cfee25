//! Image comparison settings.

use serde::{Deserialize, Serialize};

// ============================================================================
// MatchLevel
// ============================================================================

/// How strictly the comparator compares the image against the baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchLevel {
    /// Images are not compared.
    None,
    /// Compare page layout only.
    Layout,
    /// Layout comparison, second generation.
    Layout2,
    /// Compare content, ignoring colors.
    Content,
    /// Compare as a human would perceive.
    #[default]
    Strict,
    /// Pixel-level comparison using [`ExactMatchSettings`].
    Exact,
}

// ============================================================================
// ExactMatchSettings
// ============================================================================

/// Thresholds for [`MatchLevel::Exact`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExactMatchSettings {
    /// Minimal non-ignorable pixel intensity difference.
    pub min_diff_intensity: i32,
    /// Minimal non-ignorable diff region width.
    pub min_diff_width: i32,
    /// Minimal non-ignorable diff region height.
    pub min_diff_height: i32,
    /// Ratio of differing pixels above which images mismatch.
    pub match_threshold: f64,
}

// ============================================================================
// ImageMatchSettings
// ============================================================================

/// Session-wide comparison defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImageMatchSettings {
    /// Comparison strictness.
    pub match_level: MatchLevel,
    /// Thresholds used with [`MatchLevel::Exact`].
    pub exact: Option<ExactMatchSettings>,
}

impl ImageMatchSettings {
    /// Creates settings for a match level with no exact thresholds.
    #[inline]
    #[must_use]
    pub const fn new(match_level: MatchLevel) -> Self {
        Self {
            match_level,
            exact: None,
        }
    }

    /// Sets exact match thresholds.
    #[inline]
    #[must_use]
    pub const fn with_exact(mut self, exact: ExactMatchSettings) -> Self {
        self.exact = Some(exact);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_level_serializes_by_name() {
        assert_eq!(serde_json::to_string(&MatchLevel::Layout2).expect("serialize"), "\"Layout2\"");
        assert_eq!(MatchLevel::default(), MatchLevel::Strict);
    }
}
