//! Error types for pdfnametree-rs.
//!
//! Provides [`NameTreeError`], the single error type returned by name tree
//! operations. Malformed-tree conditions ([`MalformedNode`], [`CycleDetected`])
//! are consumed by the repair engine when auto-repair is enabled and reported
//! as [`RepairDisabled`] when it is not.
//!
//! [`MalformedNode`]: NameTreeError::MalformedNode
//! [`CycleDetected`]: NameTreeError::CycleDetected
//! [`RepairDisabled`]: NameTreeError::RepairDisabled

use std::fmt;

use crate::NodeId;
use crate::key::NameKey;

/// Error type for name tree operations.
#[derive(Debug, Clone, PartialEq)]
pub enum NameTreeError {
    /// A node is neither a valid leaf nor a valid intermediate node.
    MalformedNode {
        /// Object id of the offending node.
        node: NodeId,
        /// What is wrong with it.
        reason: String,
    },
    /// A node was reached twice while walking the tree.
    CycleDetected {
        /// Object id of the node that was revisited.
        node: NodeId,
    },
    /// The key is not present in the tree.
    NotFound(NameKey),
    /// The tree violates the name tree invariants and auto-repair is off.
    RepairDisabled {
        /// Description of the first violation found.
        reason: String,
    },
    /// The underlying object store failed.
    Backend(String),
}

impl NameTreeError {
    /// Shorthand for a [`NameTreeError::MalformedNode`].
    pub fn malformed(node: NodeId, reason: impl Into<String>) -> Self {
        NameTreeError::MalformedNode {
            node,
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors that mean the tree itself is malformed.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            NameTreeError::MalformedNode { .. }
                | NameTreeError::CycleDetected { .. }
                | NameTreeError::RepairDisabled { .. }
        )
    }

    /// Returns `true` for [`NameTreeError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, NameTreeError::NotFound(_))
    }
}

impl fmt::Display for NameTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameTreeError::MalformedNode { node, reason } => {
                write!(f, "malformed name tree node {} {}: {reason}", node.0, node.1)
            }
            NameTreeError::CycleDetected { node } => {
                write!(f, "name tree node {} {} is reachable more than once", node.0, node.1)
            }
            NameTreeError::NotFound(key) => write!(f, "key not found: {key}"),
            NameTreeError::RepairDisabled { reason } => {
                write!(f, "name tree is malformed and auto-repair is disabled: {reason}")
            }
            NameTreeError::Backend(msg) => write!(f, "object store error: {msg}"),
        }
    }
}

impl std::error::Error for NameTreeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_names_node() {
        let err = NameTreeError::malformed((12, 0), "has both /Kids and /Names");
        assert_eq!(
            err.to_string(),
            "malformed name tree node 12 0: has both /Kids and /Names"
        );
    }

    #[test]
    fn cycle_display() {
        let err = NameTreeError::CycleDetected { node: (3, 1) };
        assert!(err.to_string().contains("3 1"));
    }

    #[test]
    fn not_found_display_decodes_key() {
        let err = NameTreeError::NotFound(NameKey::from("intro"));
        assert_eq!(err.to_string(), "key not found: \"intro\"");
    }

    #[test]
    fn repair_disabled_display() {
        let err = NameTreeError::RepairDisabled {
            reason: "unsorted keys".to_string(),
        };
        assert!(err.to_string().contains("auto-repair is disabled"));
        assert!(err.to_string().contains("unsorted keys"));
    }

    #[test]
    fn malformed_classification() {
        assert!(NameTreeError::malformed((1, 0), "x").is_malformed());
        assert!(NameTreeError::CycleDetected { node: (1, 0) }.is_malformed());
        assert!(
            NameTreeError::RepairDisabled {
                reason: String::new()
            }
            .is_malformed()
        );
        assert!(!NameTreeError::NotFound(NameKey::from("k")).is_malformed());
        assert!(!NameTreeError::Backend("gone".to_string()).is_malformed());
    }

    #[test]
    fn not_found_classification() {
        assert!(NameTreeError::NotFound(NameKey::from("k")).is_not_found());
        assert!(!NameTreeError::Backend("gone".to_string()).is_not_found());
    }

    #[test]
    fn implements_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(NameTreeError::Backend("missing object".to_string()));
        assert!(err.to_string().contains("missing object"));
    }
}
