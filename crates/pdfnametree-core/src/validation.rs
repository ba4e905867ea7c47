//! Name tree validation types.
//!
//! Provides [`ValidationIssue`] for reporting invariant violations found while
//! checking a name tree, [`IssueCode`] for classifying them, and [`Severity`]
//! for deciding whether a violation makes the tree unusable.

use std::fmt;

use crate::NodeId;
use crate::error::NameTreeError;

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Invariant violation; lookups over the tree cannot be trusted.
    Error,
    /// Non-conformance that does not affect lookups.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Machine-readable category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IssueCode {
    /// A node was reached twice (cycle or shared subtree).
    Cycle,
    /// A node is neither a leaf nor an intermediate node, or is missing.
    MalformedNode,
    /// Keys within a leaf are not ascending.
    UnsortedKeys,
    /// A key is repeated within a leaf.
    DuplicateKey,
    /// Sibling subtrees overlap or are out of order.
    OverlappingKids,
    /// A non-root, non-empty node has no `/Limits`.
    MissingLimits,
    /// A node's `/Limits` disagree with the keys below it.
    BadLimits,
    /// The tree is deeper than the configured bound.
    MaxDepth,
    /// A non-root node has no entries or kids.
    EmptyNode,
    /// The root carries `/Limits`.
    RootLimits,
}

impl IssueCode {
    /// Returns the string tag for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::Cycle => "CYCLE",
            IssueCode::MalformedNode => "MALFORMED_NODE",
            IssueCode::UnsortedKeys => "UNSORTED_KEYS",
            IssueCode::DuplicateKey => "DUPLICATE_KEY",
            IssueCode::OverlappingKids => "OVERLAPPING_KIDS",
            IssueCode::MissingLimits => "MISSING_LIMITS",
            IssueCode::BadLimits => "BAD_LIMITS",
            IssueCode::MaxDepth => "MAX_DEPTH",
            IssueCode::EmptyNode => "EMPTY_NODE",
            IssueCode::RootLimits => "ROOT_LIMITS",
        }
    }

    /// The severity issues with this code are reported at.
    pub fn severity(&self) -> Severity {
        match self {
            IssueCode::EmptyNode | IssueCode::RootLimits => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An invariant violation found in a name tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationIssue {
    /// Severity of the issue.
    pub severity: Severity,
    /// Issue category.
    pub code: IssueCode,
    /// Human-readable description of the issue.
    pub message: String,
    /// Object id of the node the issue was found at, if any.
    pub node: Option<NodeId>,
}

impl ValidationIssue {
    /// Create an issue; the severity follows from the code.
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
            node: None,
        }
    }

    /// Create an issue located at a node.
    pub fn at(code: IssueCode, node: NodeId, message: impl Into<String>) -> Self {
        Self {
            node: Some(node),
            ..Self::new(code, message)
        }
    }

    /// Returns `true` if the issue is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Returns `true` if the issue is a warning.
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Convert the issue into the error a caller sees for it.
    pub fn to_error(&self) -> NameTreeError {
        match (self.code, self.node) {
            (IssueCode::Cycle, Some(node)) => NameTreeError::CycleDetected { node },
            (_, Some(node)) => NameTreeError::malformed(node, self.message.clone()),
            (_, None) => NameTreeError::RepairDisabled {
                reason: self.message.clone(),
            },
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.message)?;
        if let Some((num, generation)) = self.node {
            write!(f, " (at object {num} {generation})")?;
        }
        Ok(())
    }
}
