//! Match metadata JSON model.
//!
//! Key names and nesting are fixed by the comparator.
//!
//! # Format
//!
//! ```json
//! {
//!   "IgnoreMismatch": true,
//!   "Options": {
//!     "Name": "home page",
//!     "UserInputs": [],
//!     "ImageMatchSettings": {
//!       "MatchLevel": "Strict",
//!       "IgnoreCaret": false,
//!       "Exact": null,
//!       "Ignore": [{"left": 0, "top": 0, "width": 10, "height": 10}],
//!       "Floating": []
//!     },
//!     "IgnoreMismatch": true,
//!     "Trim": {"Enabled": false}
//!   },
//!   "UserInputs": [],
//!   "AppOutput": {"title": "Home", "screenshot64": null},
//!   "tag": "home page"
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::checkpoint::{ExactMatchSettings, ImageMatchSettings, MatchLevel};
use crate::error::Result;
use crate::geometry::{FloatingRegion, Point, Region};

// ============================================================================
// User Inputs
// ============================================================================

/// Mouse action recorded as a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseAction {
    /// Left click.
    Click,
    /// Right click.
    RightClick,
    /// Double click.
    DoubleClick,
    /// Pointer move.
    Move,
    /// Button press.
    Down,
    /// Button release.
    Up,
}

/// A user interaction that happened before the checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum UserInput {
    /// Mouse interaction with a control.
    #[serde(rename_all = "PascalCase")]
    Mouse {
        /// What the mouse did.
        mouse_action: MouseAction,
        /// Bounds of the control, in screenshot coordinates.
        control: Region,
        /// Pointer position relative to the control.
        location: Point,
    },
    /// Text typed into a control.
    #[serde(rename_all = "PascalCase")]
    Text {
        /// Bounds of the control, in screenshot coordinates.
        control: Region,
        /// The typed text.
        text: String,
    },
}

// ============================================================================
// AppOutput
// ============================================================================

/// Application output accompanying the image.
///
/// The image travels as raw bytes after the metadata, so `screenshot64`
/// is always `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppOutput {
    /// Page title.
    pub title: String,
    /// Inline base64 image (unused).
    pub screenshot64: Option<String>,
}

impl AppOutput {
    /// Creates output for a page title.
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            screenshot64: None,
        }
    }
}

// ============================================================================
// MatchData
// ============================================================================

/// Metadata of one match attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchData {
    /// `true` for soft attempts: a mismatch is not recorded as a failure.
    pub ignore_mismatch: bool,
    /// Checkpoint options.
    pub options: CheckOptions,
    /// User inputs preceding the checkpoint.
    pub user_inputs: Vec<UserInput>,
    /// Page output.
    pub app_output: AppOutput,
    /// Checkpoint tag.
    #[serde(rename = "tag")]
    pub tag: String,
}

/// The `Options` object of [`MatchData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckOptions {
    /// Checkpoint tag.
    pub name: String,
    /// User inputs preceding the checkpoint.
    pub user_inputs: Vec<UserInput>,
    /// Image comparison settings.
    pub image_match_settings: ImageMatchSettingsData,
    /// Same value as [`MatchData::ignore_mismatch`].
    pub ignore_mismatch: bool,
    /// Trimming settings (always disabled).
    pub trim: Trim,
}

/// Resolved image comparison settings for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageMatchSettingsData {
    /// Comparison strictness.
    pub match_level: MatchLevel,
    /// Whether to ignore text carets.
    pub ignore_caret: bool,
    /// Thresholds for [`MatchLevel::Exact`].
    pub exact: Option<ExactMatchSettings>,
    /// Regions excluded from comparison.
    pub ignore: Vec<Region>,
    /// Regions allowed to move.
    pub floating: Vec<FloatingRegion>,
}

/// Trimming settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Trim {
    /// Whether the comparator trims the image.
    pub enabled: bool,
}

impl MatchData {
    /// Creates metadata with default settings and no regions or inputs.
    #[must_use]
    pub fn new(tag: impl Into<String>, app_output: AppOutput, ignore_mismatch: bool) -> Self {
        let tag = tag.into();
        Self {
            ignore_mismatch,
            options: CheckOptions {
                name: tag.clone(),
                user_inputs: Vec::new(),
                image_match_settings: ImageMatchSettingsData {
                    match_level: MatchLevel::default(),
                    ignore_caret: false,
                    exact: None,
                    ignore: Vec::new(),
                    floating: Vec::new(),
                },
                ignore_mismatch,
                trim: Trim::default(),
            },
            user_inputs: Vec::new(),
            app_output,
            tag,
        }
    }

    /// Sets the user inputs (sent both at the top level and in `Options`).
    #[must_use]
    pub fn with_user_inputs(mut self, user_inputs: Vec<UserInput>) -> Self {
        self.options.user_inputs = user_inputs.clone();
        self.user_inputs = user_inputs;
        self
    }

    /// Applies session match settings and the per-check caret flag.
    #[must_use]
    pub fn with_match_settings(
        mut self,
        settings: &ImageMatchSettings,
        ignore_caret: bool,
    ) -> Self {
        let data = &mut self.options.image_match_settings;
        data.match_level = settings.match_level;
        data.exact = settings.exact;
        data.ignore_caret = ignore_caret;
        self
    }

    /// Sets the resolved ignore and floating regions.
    #[must_use]
    pub fn with_regions(mut self, ignore: Vec<Region>, floating: Vec<FloatingRegion>) -> Self {
        let data = &mut self.options.image_match_settings;
        data.ignore = ignore;
        data.floating = floating;
        self
    }

    /// Serializes to UTF-8 JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
