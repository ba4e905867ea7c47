//! Validity check over a whole name tree.
//!
//! Walks every node reachable from the root once, collecting
//! [`ValidationIssue`]s. Any error-severity issue means lookups cannot be
//! trusted and the tree needs repair.

use std::collections::HashSet;

use lopdf::ObjectId;
use pdfnametree_core::{IssueCode, Limits, ValidationIssue};
use pdfnametree_parse::{Node, ObjectStore, read_node, read_root};

struct Validator<'a, S> {
    store: &'a S,
    root: ObjectId,
    max_depth: usize,
    visited: HashSet<ObjectId>,
    issues: Vec<ValidationIssue>,
}

impl<S: ObjectStore> Validator<'_, S> {
    fn report(&mut self, code: IssueCode, node: ObjectId, message: impl Into<String>) {
        self.issues.push(ValidationIssue::at(code, node, message));
    }

    /// Check the subtree at `id`, returning the range of keys actually in it.
    fn visit(&mut self, id: ObjectId, depth: usize) -> Option<Limits> {
        if !self.visited.insert(id) {
            self.report(IssueCode::Cycle, id, "node is reachable more than once");
            return None;
        }
        if depth > self.max_depth {
            self.report(
                IssueCode::MaxDepth,
                id,
                format!("tree is deeper than {} levels", self.max_depth),
            );
            return None;
        }
        let is_root = id == self.root;
        let node = if is_root {
            read_root(self.store, id)
        } else {
            read_node(self.store, id)
        };
        let node = match node {
            Ok(node) => node,
            Err(err) => {
                self.report(IssueCode::MalformedNode, id, err.to_string());
                return None;
            }
        };
        let issues_before = self.issues.len();
        let actual = match &node {
            Node::Leaf(leaf) => {
                let mut sorted = true;
                for pair in leaf.entries.windows(2) {
                    let (prev, next) = (&pair[0].0, &pair[1].0);
                    if prev == next {
                        self.report(IssueCode::DuplicateKey, id, format!("key {next} is repeated"));
                        sorted = false;
                    } else if prev > next {
                        self.report(
                            IssueCode::UnsortedKeys,
                            id,
                            format!("key {next} follows {prev}"),
                        );
                        sorted = false;
                    }
                }
                if sorted {
                    leaf.actual_limits()
                } else {
                    let min = leaf.keys().min()?;
                    let max = leaf.keys().max()?;
                    Some(Limits::new(min, max))
                }
            }
            Node::Intermediate(inner) => {
                let mut bounds: Option<Limits> = None;
                let mut previous: Option<Limits> = None;
                for kid in &inner.kids {
                    let Some(kid_range) = self.visit(*kid, depth + 1) else {
                        continue;
                    };
                    if let Some(prev) = &previous {
                        if kid_range.min <= prev.max {
                            self.report(
                                IssueCode::OverlappingKids,
                                id,
                                format!(
                                    "kid {} {} range {kid_range} does not follow {prev}",
                                    kid.0, kid.1
                                ),
                            );
                        }
                    }
                    bounds = Some(match bounds {
                        Some(b) => b.union(&kid_range),
                        None => kid_range.clone(),
                    });
                    previous = Some(kid_range);
                }
                bounds
            }
        };
        let clean = self.issues[issues_before..].iter().all(|issue| issue.is_warning());
        self.check_limits(id, is_root, &node, actual.as_ref(), clean);
        actual
    }

    /// Compare declared `/Limits` with the keys found below `id`.
    ///
    /// `clean` is false when an error was already reported inside the
    /// subtree, in which case a missing range says nothing about `/Limits`.
    fn check_limits(
        &mut self,
        id: ObjectId,
        is_root: bool,
        node: &Node,
        actual: Option<&Limits>,
        clean: bool,
    ) {
        let declared = node.limits();
        if is_root {
            if declared.is_some() {
                self.report(IssueCode::RootLimits, id, "root node carries /Limits");
            }
            return;
        }
        match (declared, actual) {
            (None, Some(actual)) => self.report(
                IssueCode::MissingLimits,
                id,
                format!("node has no /Limits, expected {actual}"),
            ),
            (Some(declared), Some(actual)) if declared != actual => self.report(
                IssueCode::BadLimits,
                id,
                format!("/Limits {declared} do not match keys {actual}"),
            ),
            (Some(declared), None) if clean => self.report(
                IssueCode::BadLimits,
                id,
                format!("/Limits {declared} declared on a subtree with no keys"),
            ),
            (None, None) if node.is_empty() => {
                self.report(IssueCode::EmptyNode, id, "node has no entries")
            }
            _ => {}
        }
    }
}

/// Check every invariant of the tree rooted at `root`.
///
/// Never fails: problems reading nodes are reported as issues.
pub(crate) fn validate_tree<S: ObjectStore>(
    store: &S,
    root: ObjectId,
    max_depth: usize,
) -> Vec<ValidationIssue> {
    let mut validator = Validator {
        store,
        root,
        max_depth,
        visited: HashSet::new(),
        issues: Vec::new(),
    };
    validator.visit(root, 0);
    validator.issues
}
