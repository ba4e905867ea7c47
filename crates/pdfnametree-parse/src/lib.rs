//! pdfnametree-parse: document object access and the name tree node model.
//!
//! This crate implements Layer 1 (object access via the [`ObjectStore`] trait,
//! implemented for [`lopdf::Document`]) and the node model that classifies
//! name tree dictionaries as leaves or intermediate nodes. It depends on
//! pdfnametree-core for shared data types.

pub mod catalog;
pub mod error;
pub mod lopdf_store;
pub mod node;
pub mod store;

pub use error::BackendError;
pub use lopdf;
pub use node::{IntermediateNode, LeafNode, Node, read_limits, read_node, read_root};
pub use pdfnametree_core;
pub use store::ObjectStore;
