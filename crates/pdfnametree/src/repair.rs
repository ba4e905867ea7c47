//! Salvage and rebuild of malformed name trees.
//!
//! Repair never trusts node structure: it walks whatever is reachable from
//! the root, keeps every well-formed key/value pair, and writes a fresh
//! balanced tree under the same root object.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

use lopdf::{Object, ObjectId};
use pdfnametree_core::{Limits, NameKey, NameTreeError, NameTreeOptions, RepairReport};
use pdfnametree_parse::node::{
    new_intermediate, new_leaf, write_intermediate, write_leaf, write_limits,
};
use pdfnametree_parse::ObjectStore;
use tracing::{debug, warn};

/// Entries recovered from a damaged tree.
#[derive(Debug, Default)]
pub(crate) struct Salvage {
    pub entries: BTreeMap<NameKey, Object>,
    pub report: RepairReport,
}

impl Salvage {
    fn skip(&mut self, message: String) {
        debug!("{message}");
        self.report.skipped += 1;
        self.report.log.push(message);
    }
}

fn key_bytes<S: ObjectStore>(store: &S, obj: &Object) -> Option<Vec<u8>> {
    match store.resolve(obj)? {
        Object::String(bytes, _) => Some(bytes.clone()),
        _ => None,
    }
}

/// Collect every readable pair reachable from `root`.
///
/// Nodes are visited depth-first, kids in stored order, and a node's own
/// `/Names` before its `/Kids`. When a key occurs more than once the first
/// occurrence in that order wins.
pub(crate) fn salvage<S: ObjectStore>(store: &S, root: ObjectId, max_depth: usize) -> Salvage {
    let mut out = Salvage::default();
    let mut visited = HashSet::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let at = format!("object {} {}", id.0, id.1);
        if !visited.insert(id) {
            out.skip(format!("{at} reached twice, skipped"));
            continue;
        }
        if depth > max_depth {
            out.skip(format!("{at} is deeper than {max_depth} levels, skipped"));
            continue;
        }
        if !store.is_dictionary(id) {
            out.skip(format!("{at} is missing or not a dictionary, skipped"));
            continue;
        }

        if let Some(names) = store.get_key(id, b"Names") {
            match store.get_array_items(names) {
                Some(items) => {
                    let mut pairs = items.chunks_exact(2);
                    for pair in pairs.by_ref() {
                        let Some(key) = key_bytes(store, &pair[0]) else {
                            out.skip(format!("non-string key in {at}, skipped"));
                            continue;
                        };
                        match out.entries.entry(NameKey::new(key)) {
                            Entry::Vacant(slot) => {
                                slot.insert(pair[1].clone());
                            }
                            Entry::Occupied(slot) => {
                                let message = format!(
                                    "duplicate key {} in {at}, later value dropped",
                                    slot.key()
                                );
                                debug!("{message}");
                                out.report.duplicates_dropped += 1;
                                out.report.log.push(message);
                            }
                        }
                    }
                    if !pairs.remainder().is_empty() {
                        out.skip(format!("odd /Names length in {at}, last item skipped"));
                    }
                }
                None => out.skip(format!("/Names of {at} is not an array, skipped")),
            }
        }

        if let Some(kids) = store.get_key(id, b"Kids") {
            match store.get_array_items(kids) {
                Some(items) => {
                    for kid in items.iter().rev() {
                        match kid {
                            Object::Reference(kid_id) => stack.push((*kid_id, depth + 1)),
                            _ => out.skip(format!("direct kid in {at}, skipped")),
                        }
                    }
                }
                None => out.skip(format!("/Kids of {at} is not an array, skipped")),
            }
        }
    }
    out.report.salvaged = out.entries.len();
    out
}

/// Write `entries` as a balanced tree under `root`, replacing its contents.
///
/// Returns the number of node objects created below the root.
pub(crate) fn rebuild<S: ObjectStore>(
    store: &mut S,
    root: ObjectId,
    entries: Vec<(NameKey, Object)>,
    fan_out: usize,
) -> Result<usize, NameTreeError> {
    write_limits(store, root, None)?;
    if entries.len() <= fan_out {
        write_leaf(store, root, &entries)?;
        return Ok(0);
    }

    let mut created = 0;
    let mut level: Vec<(ObjectId, Limits)> = Vec::new();
    for chunk in entries.chunks(fan_out) {
        let Some(limits) = Limits::from_sorted(chunk.iter().map(|(key, _)| key)) else {
            continue;
        };
        level.push((new_leaf(store, chunk), limits));
        created += 1;
    }
    while level.len() > fan_out {
        let mut next = Vec::with_capacity(level.len().div_ceil(fan_out));
        for group in level.chunks(fan_out) {
            let (first, last) = (&group[0].1, &group[group.len() - 1].1);
            let limits = Limits::new(first.min.clone(), last.max.clone());
            let kids: Vec<ObjectId> = group.iter().map(|(id, _)| *id).collect();
            next.push((new_intermediate(store, &kids, Some(&limits)), limits));
            created += 1;
        }
        level = next;
    }
    let kids: Vec<ObjectId> = level.iter().map(|(id, _)| *id).collect();
    write_intermediate(store, root, &kids)?;
    Ok(created)
}

/// Salvage and rebuild the tree at `root`.
///
/// # Errors
///
/// Fails only if the root itself cannot be written.
pub(crate) fn repair_tree<S: ObjectStore>(
    store: &mut S,
    root: ObjectId,
    options: &NameTreeOptions,
) -> Result<RepairReport, NameTreeError> {
    if !store.is_dictionary(root) {
        return Err(NameTreeError::malformed(root, "root is missing or not a dictionary"));
    }
    let Salvage { entries, mut report } = salvage(&*store, root, options.max_depth);
    let entries: Vec<(NameKey, Object)> = entries.into_iter().collect();
    report.nodes_created = rebuild(store, root, entries, options.effective_fan_out())?;
    warn!(root = ?root, %report, "rebuilt name tree");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_tree;
    use lopdf::{Document, StringFormat, dictionary};
    use pdfnametree_parse::{Node, read_root};

    fn s(text: &str) -> Object {
        Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
    }

    fn keys(salvage: &Salvage) -> Vec<String> {
        salvage
            .entries
            .keys()
            .map(|k| String::from_utf8_lossy(k.as_bytes()).into_owned())
            .collect()
    }

    #[test]
    fn salvage_sorts_and_keeps_first_duplicate() {
        let mut doc = Document::with_version("1.5");
        let a = doc.add_object(dictionary! {
            "Names" => vec![s("b"), Object::Integer(1), s("a"), Object::Integer(2)],
        });
        let b = doc.add_object(dictionary! {
            "Names" => vec![s("a"), Object::Integer(3)],
        });
        let root = doc.add_object(dictionary! {
            "Kids" => vec![Object::Reference(a), Object::Reference(b)],
        });
        let out = salvage(&doc, root, 64);
        assert_eq!(keys(&out), vec!["a", "b"]);
        assert_eq!(out.entries[&NameKey::from("a")], Object::Integer(2));
        assert_eq!(out.report.duplicates_dropped, 1);
        assert_eq!(out.report.salvaged, 2);
    }

    #[test]
    fn salvage_reads_names_before_kids() {
        let mut doc = Document::with_version("1.5");
        let kid = doc.add_object(dictionary! { "Names" => vec![s("k"), Object::Integer(2)] });
        let root = doc.add_object(dictionary! {
            "Names" => vec![s("k"), Object::Integer(1)],
            "Kids" => vec![Object::Reference(kid)],
        });
        let out = salvage(&doc, root, 64);
        assert_eq!(out.entries[&NameKey::from("k")], Object::Integer(1));
    }

    #[test]
    fn salvage_skips_junk() {
        let mut doc = Document::with_version("1.5");
        let bad = doc.add_object(Object::Integer(4));
        let root = doc.add_object(dictionary! {
            "Names" => vec![s("a"), Object::Null, Object::Integer(7), Object::Null, s("z")],
            "Kids" => vec![Object::Reference(bad), Object::Integer(1), Object::Reference((99, 0))],
        });
        let out = salvage(&doc, root, 64);
        assert_eq!(keys(&out), vec!["a"]);
        // non-string key, odd tail, non-dict kid, direct kid, dangling kid
        assert_eq!(out.report.skipped, 5);
        assert_eq!(out.report.log.len(), 5);
    }

    #[test]
    fn salvage_survives_cycles() {
        let mut doc = Document::with_version("1.5");
        let root = doc.new_object_id();
        let kid = doc.add_object(dictionary! {
            "Names" => vec![s("x"), Object::Null],
            "Kids" => vec![Object::Reference(root)],
        });
        doc.objects.insert(
            root,
            Object::Dictionary(dictionary! { "Kids" => vec![Object::Reference(kid)] }),
        );
        let out = salvage(&doc, root, 64);
        assert_eq!(keys(&out), vec!["x"]);
        assert_eq!(out.report.skipped, 1);
    }

    #[test]
    fn rebuild_small_tree_is_root_leaf() {
        let mut doc = Document::with_version("1.5");
        let root = doc.add_object(dictionary! {
            "Kids" => Vec::<Object>::new(),
            "Limits" => vec![s("a"), s("b")],
        });
        let entries = vec![(NameKey::from("a"), Object::Null), (NameKey::from("b"), Object::Null)];
        assert_eq!(rebuild(&mut doc, root, entries, 4).unwrap(), 0);
        let Node::Leaf(leaf) = read_root(&doc, root).unwrap() else {
            panic!("expected leaf root");
        };
        assert_eq!(leaf.entries.len(), 2);
        assert!(leaf.limits.is_none());
    }

    #[test]
    fn rebuild_large_tree_is_balanced_and_valid() {
        let mut doc = Document::with_version("1.5");
        let root = doc.add_object(dictionary! { "Names" => Vec::<Object>::new() });
        let entries: Vec<(NameKey, Object)> = (0..50)
            .map(|i| (NameKey::from(format!("k{i:03}")), Object::Integer(i)))
            .collect();
        // 50 entries at fan-out 3: 17 leaves, 6 + 2 intermediates
        let created = rebuild(&mut doc, root, entries, 3).unwrap();
        assert_eq!(created, 17 + 6 + 2);
        assert!(validate_tree(&doc, root, 64).is_empty());
        let Node::Intermediate(top) = read_root(&doc, root).unwrap() else {
            panic!("expected intermediate root");
        };
        assert_eq!(top.kids.len(), 2);
    }

    #[test]
    fn repair_tree_reports_and_validates() {
        let mut doc = Document::with_version("1.5");
        let root = doc.add_object(dictionary! {
            "Names" => vec![
                s("c"),
                Object::Integer(3),
                s("a"),
                Object::Integer(1),
                s("c"),
                Object::Integer(9),
            ],
            "Limits" => vec![s("a"), s("c")],
        });
        let report = repair_tree(&mut doc, root, &NameTreeOptions::default()).unwrap();
        assert_eq!(report.salvaged, 2);
        assert_eq!(report.duplicates_dropped, 1);
        assert_eq!(report.nodes_created, 0);
        assert!(validate_tree(&doc, root, 64).is_empty());
    }

    #[test]
    fn repair_missing_root_fails() {
        let mut doc = Document::with_version("1.5");
        let err = repair_tree(&mut doc, (5, 0), &NameTreeOptions::default()).unwrap_err();
        assert!(err.is_malformed());
    }
}
