//! Stable polygon identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a polygon within one orchestrator.
///
/// Ids are handed out sequentially by the orchestrator that owns the
/// polygon, so a seeded run produces the same ids every time. They are
/// never reused, unlike particle slot ids.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolygonId(pub u64);

impl PolygonId {
    /// Create a PolygonId from a raw value
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// The id following this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolygonId({})", self.0)
    }
}

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let first = PolygonId::from_raw(1);
        let second = first.next();
        assert_ne!(first, second);
        assert!(second > first);
        assert_eq!(second.raw(), 2);
    }

    #[test]
    fn test_display() {
        let id = PolygonId::from_raw(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{:?}", id), "PolygonId(42)");
    }
}
