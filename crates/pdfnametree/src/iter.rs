//! Ordered traversal of every entry in a tree.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use lopdf::{Object, ObjectId};
use pdfnametree_core::{NameKey, NameTreeError};
use pdfnametree_parse::{Node, ObjectStore, read_node, read_root};

/// Iterator over `(key, value)` pairs in key order.
///
/// Created by [`NameTree::entries`](crate::NameTree::entries). Leaves are
/// read one at a time from an explicit stack, so memory use is bounded by the
/// widest leaf plus the pending kids. The first error ends the iteration.
pub struct Entries<'a, S> {
    store: &'a S,
    root: ObjectId,
    max_depth: usize,
    stack: Vec<(ObjectId, usize)>,
    buffer: VecDeque<(NameKey, Object)>,
    visited: HashSet<ObjectId>,
    done: bool,
}

impl<'a, S: ObjectStore> Entries<'a, S> {
    pub(crate) fn new(store: &'a S, root: ObjectId, max_depth: usize) -> Self {
        Self {
            store,
            root,
            max_depth,
            stack: vec![(root, 0)],
            buffer: VecDeque::new(),
            visited: HashSet::new(),
            done: false,
        }
    }

    fn fail(&mut self, err: NameTreeError) -> Option<Result<(NameKey, Object), NameTreeError>> {
        self.done = true;
        self.stack.clear();
        self.buffer.clear();
        Some(Err(err))
    }
}

impl<S: ObjectStore> Iterator for Entries<'_, S> {
    type Item = Result<(NameKey, Object), NameTreeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.buffer.pop_front() {
                return Some(Ok(entry));
            }
            if self.done {
                return None;
            }
            let Some((id, depth)) = self.stack.pop() else {
                self.done = true;
                return None;
            };
            if !self.visited.insert(id) {
                return self.fail(NameTreeError::CycleDetected { node: id });
            }
            if depth > self.max_depth {
                let reason = format!("tree is deeper than {} levels", self.max_depth);
                return self.fail(NameTreeError::malformed(id, reason));
            }
            let node = if id == self.root {
                read_root(self.store, id)
            } else {
                read_node(self.store, id)
            };
            match node {
                Ok(Node::Leaf(leaf)) => self.buffer.extend(leaf.entries),
                Ok(Node::Intermediate(inner)) => {
                    self.stack
                        .extend(inner.kids.iter().rev().map(|kid| (*kid, depth + 1)));
                }
                Err(err) => return self.fail(err),
            }
        }
    }
}

impl<S> std::iter::FusedIterator for Entries<'_, S> where S: ObjectStore {}

impl<S> fmt::Debug for Entries<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entries")
            .field("root", &self.root)
            .field("pending_nodes", &self.stack.len())
            .field("buffered", &self.buffer.len())
            .field("done", &self.done)
            .finish()
    }
}
