//! Key lookup by descent through node `/Limits`.

use std::collections::HashSet;

use lopdf::{Object, ObjectId};
use pdfnametree_core::{Limits, NameTreeError};
use pdfnametree_parse::{LeafNode, Node, ObjectStore, read_limits, read_node, read_root};
use tracing::trace;

/// One intermediate node on the path from the root to a leaf.
#[derive(Debug, Clone)]
pub(crate) struct PathStep {
    /// The intermediate node.
    pub node: ObjectId,
    /// Its kids as read during descent.
    pub kids: Vec<ObjectId>,
    /// Index of the kid the descent continued into.
    pub index: usize,
    /// Its declared `/Limits`.
    pub limits: Option<Limits>,
}

/// Result of descending to the leaf that owns (or would own) a key.
#[derive(Debug, Clone)]
pub(crate) struct Descent {
    /// Intermediate nodes from the root down; empty when the root is a leaf.
    pub path: Vec<PathStep>,
    /// The target leaf.
    ///
    /// An intermediate node without kids is reported as an empty leaf with its
    /// id; writing entries to it turns it into a real leaf.
    pub leaf: LeafNode,
    /// `Ok(i)` if `leaf.entries[i]` holds the key, else its insertion point.
    pub position: Result<usize, usize>,
}

/// Pick the kid whose range could contain `key`: the last kid whose minimum
/// is `<= key`, or the first kid if `key` precedes every range.
///
/// Binary search over `kids`, reading `/Limits` only for probed kids. Kids
/// without `/Limits` hold no keys; a probe that lands on one steps right to
/// the next kid that has them.
fn choose_kid<S: ObjectStore>(
    store: &S,
    kids: &[ObjectId],
    key: &[u8],
) -> Result<usize, NameTreeError> {
    let mut best = None;
    let (mut lo, mut hi) = (0, kids.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let mut probe = mid;
        let mut min = None;
        while probe < hi {
            if let Some(limits) = read_limits(store, kids[probe])? {
                min = Some(limits.min);
                break;
            }
            probe += 1;
        }
        match min {
            Some(min) if min.as_bytes() <= key => {
                best = Some(probe);
                lo = probe + 1;
            }
            _ => hi = mid,
        }
    }
    if let Some(index) = best {
        return Ok(index);
    }
    for (index, kid) in kids.iter().enumerate() {
        if read_limits(store, *kid)?.is_some() {
            return Ok(index);
        }
    }
    Ok(0)
}

/// Descend from `root` to the leaf responsible for `key`.
///
/// # Errors
///
/// Returns [`NameTreeError::CycleDetected`] if a node repeats on the path and
/// [`NameTreeError::MalformedNode`] if a node cannot be classified or the
/// path is longer than `max_depth`.
pub(crate) fn descend<S: ObjectStore>(
    store: &S,
    root: ObjectId,
    key: &[u8],
    max_depth: usize,
) -> Result<Descent, NameTreeError> {
    let mut visited = HashSet::from([root]);
    let mut path = Vec::new();
    let mut node = read_root(store, root)?;
    loop {
        match node {
            Node::Leaf(leaf) => {
                let position = leaf
                    .entries
                    .binary_search_by(|(k, _)| k.as_bytes().cmp(key));
                trace!(leaf = ?leaf.id, depth = path.len(), found = position.is_ok(), "descended");
                return Ok(Descent {
                    path,
                    leaf,
                    position,
                });
            }
            Node::Intermediate(inner) if inner.kids.is_empty() => {
                let leaf = LeafNode {
                    id: inner.id,
                    entries: Vec::new(),
                    limits: inner.limits,
                };
                return Ok(Descent {
                    path,
                    leaf,
                    position: Err(0),
                });
            }
            Node::Intermediate(inner) => {
                if path.len() >= max_depth {
                    return Err(NameTreeError::malformed(
                        inner.id,
                        format!("tree is deeper than {max_depth} levels"),
                    ));
                }
                let index = choose_kid(store, &inner.kids, key)?;
                let next = inner.kids[index];
                if !visited.insert(next) {
                    return Err(NameTreeError::CycleDetected { node: next });
                }
                path.push(PathStep {
                    node: inner.id,
                    kids: inner.kids,
                    index,
                    limits: inner.limits,
                });
                node = read_node(store, next)?;
            }
        }
    }
}

/// Look up the value stored under `key`.
pub(crate) fn find<S: ObjectStore>(
    store: &S,
    root: ObjectId,
    key: &[u8],
    max_depth: usize,
) -> Result<Option<Object>, NameTreeError> {
    let descent = descend(store, root, key, max_depth)?;
    Ok(match descent.position {
        Ok(i) => descent.leaf.entries.into_iter().nth(i).map(|(_, value)| value),
        Err(_) => None,
    })
}
