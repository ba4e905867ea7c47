//! Name tree repair reporting.
//!
//! Provides [`RepairReport`] describing what a rebuild salvaged, dropped and
//! created.

use std::fmt;

/// Result of rebuilding a name tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepairReport {
    /// Number of distinct key/value pairs kept in the rebuilt tree.
    pub salvaged: usize,
    /// Number of later occurrences of an already-seen key that were dropped.
    pub duplicates_dropped: usize,
    /// Number of unusable items skipped (bad keys, dangling kids, odd arrays).
    pub skipped: usize,
    /// Number of node objects created below the root.
    pub nodes_created: usize,
    /// Log of notable events, one entry per event.
    pub log: Vec<String>,
}

impl RepairReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if anything was dropped or skipped.
    pub fn is_lossy(&self) -> bool {
        self.duplicates_dropped > 0 || self.skipped > 0
    }
}

impl fmt::Display for RepairReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "salvaged {} entries, dropped {} duplicates, skipped {} items, created {} nodes",
            self.salvaged, self.duplicates_dropped, self.skipped, self.nodes_created
        )
    }
}
