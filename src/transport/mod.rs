//! Comparator transport.
//!
//! The engine talks to the remote comparator through the [`Comparator`]
//! trait. [`HttpComparator`] is the HTTP implementation; tests and other
//! transports provide their own.
//!
//! Transport errors are never retried by the engine. A comparator that
//! wants retry or backoff implements it itself.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `http` | [`HttpComparator`] over `reqwest` |

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::identifiers::SessionId;

// ============================================================================
// Submodules
// ============================================================================

mod http;

// ============================================================================
// Re-exports
// ============================================================================

pub use http::HttpComparator;

// ============================================================================
// RunningSession
// ============================================================================

/// A session opened on the comparator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningSession {
    /// Session identifier used in match requests.
    pub id: SessionId,
    /// Link to the session results, if the service provides one.
    #[serde(default)]
    pub url: Option<String>,
    /// `true` if the session has no baseline yet.
    #[serde(default)]
    pub is_new_session: bool,
}

impl RunningSession {
    /// Creates a session handle from its identifier.
    #[must_use]
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            url: None,
            is_new_session: false,
        }
    }
}

// ============================================================================
// Comparator
// ============================================================================

/// Remote image comparator.
#[async_trait]
pub trait Comparator: Send + Sync {
    /// Submits one framed match request.
    ///
    /// Returns `true` if the image matches the session's baseline.
    async fn match_window(&self, session: &RunningSession, body: Vec<u8>) -> Result<bool>;
}

// ============================================================================
// Tests
// ============================================================================
