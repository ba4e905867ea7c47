//! pdfnametree-core: Backend-independent data types for PDF name trees.
//!
//! This crate provides the foundational types ([`NameKey`], [`Limits`],
//! [`NameTreeOptions`], [`NameTreeError`], [`ValidationIssue`],
//! [`RepairReport`]) used by pdfnametree-rs. It does not depend on any PDF
//! object model.

pub mod error;
pub mod key;
pub mod limits;
pub mod options;
pub mod repair;
pub mod validation;

pub use error::NameTreeError;
pub use key::NameKey;
pub use limits::Limits;
pub use options::{DEFAULT_FAN_OUT, DEFAULT_MAX_DEPTH, MIN_FAN_OUT, NameTreeOptions, TreeState};
pub use repair::RepairReport;
pub use validation::{IssueCode, Severity, ValidationIssue};

/// Identity of an indirect PDF object: object number and generation.
///
/// Layout-compatible with `lopdf::ObjectId`.
pub type NodeId = (u32, u16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reexports_resolve() {
        let key = NameKey::from("a");
        let limits = Limits::single(&key);
        assert!(limits.contains(b"a"));
        assert!(NameTreeOptions::default().auto_repair);
    }
}
