//! Type-safe identifier wrappers.
//!
//! Newtypes keep remote session IDs and driver element references apart at
//! compile time. Both are opaque strings handed out by other systems.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ============================================================================
// SessionId
// ============================================================================

/// Identifier of a running session on the remote comparator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session ID from the value returned by the service.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// ElementId
// ============================================================================

/// Reference to a DOM element owned by the driver layer.
///
/// Cloning shares the underlying string; the reference itself is never
/// interpreted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(Arc<str>);

impl ElementId {
    /// Wraps a driver element reference.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the reference as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_serializes_as_string() {
        let id = SessionId::new("abc-123");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"abc-123\"");
        assert_eq!(id.to_string(), "abc-123");
    }

    #[test]
    fn test_element_id_clone_shares_value() {
        let id = ElementId::new("element-6066");
        let copy = id.clone();
        assert_eq!(id, copy);
        assert_eq!(copy.as_str(), "element-6066");
    }
}
