//! pdfnametree: read, modify and repair PDF name trees.
//!
//! This is the public API facade crate for pdfnametree-rs. It re-exports types
//! from pdfnametree-core and uses pdfnametree-parse for object access.
//!
//! # Architecture
//!
//! - **pdfnametree-core**: Backend-independent data types (keys, limits, options, errors)
//! - **pdfnametree-parse**: Object access (Layer 1) and the name tree node model
//! - **pdfnametree** (this crate): Lookup, validation, repair, mutation and
//!   iteration behind the [`NameTree`] holder
//!
//! # Example
//!
//! ```ignore
//! use pdfnametree::{NameTree, catalog, lopdf::Object};
//!
//! let mut doc = lopdf::Document::load("input.pdf")?;
//! let root = catalog::ensure_name_tree(&mut doc, b"Dests")?;
//! let mut tree = NameTree::new(&mut doc, root, true);
//! tree.set("intro", Object::Reference((12, 0)))?;
//! for entry in tree.entries()? {
//!     let (key, value) = entry?;
//!     println!("{key} -> {value:?}");
//! }
//! ```

mod iter;
mod lookup;
mod mutate;
mod repair;
mod tree;
mod validate;

pub use iter::Entries;
pub use tree::NameTree;

pub use pdfnametree_core::{
    DEFAULT_FAN_OUT, DEFAULT_MAX_DEPTH, IssueCode, Limits, MIN_FAN_OUT, NameKey, NameTreeError,
    NameTreeOptions, RepairReport, Severity, TreeState, ValidationIssue,
};
pub use pdfnametree_parse::{BackendError, ObjectStore, catalog, lopdf};

pub use pdfnametree_core;
pub use pdfnametree_parse;
