//! Insertion and removal.
//!
//! Both operations start from a [`Descent`] and then fix up the nodes on the
//! path: leaves stay sorted, non-root `/Limits` stay exact, and nodes that
//! grow past the fan-out are split in two. The root object is never
//! replaced; when it overflows its content moves into two new children.

use lopdf::{Object, ObjectId};
use pdfnametree_core::{Limits, NameKey, NameTreeError, NameTreeOptions};
use pdfnametree_parse::node::{
    new_intermediate, new_leaf, write_intermediate, write_leaf, write_limits,
};
use pdfnametree_parse::{ObjectStore, read_limits};
use tracing::debug;

use crate::lookup::{Descent, descend};

/// Bounds of a run of sibling subtrees, from their declared `/Limits`.
fn kids_limits<S: ObjectStore>(
    store: &S,
    kids: &[ObjectId],
) -> Result<Option<Limits>, NameTreeError> {
    let mut min = None;
    let mut max = None;
    for kid in kids {
        if let Some(limits) = read_limits(store, *kid)? {
            if min.is_none() {
                min = Some(limits.min);
            }
            max = Some(limits.max);
        }
    }
    Ok(min.zip(max).map(|(min, max)| Limits { min, max }))
}

/// Insert or replace `key`, returning the previous value.
pub(crate) fn insert<S: ObjectStore>(
    store: &mut S,
    root: ObjectId,
    key: NameKey,
    value: Object,
    options: &NameTreeOptions,
) -> Result<Option<Object>, NameTreeError> {
    let fan_out = options.effective_fan_out();
    let Descent {
        mut path,
        mut leaf,
        position,
    } = descend(&*store, root, key.as_bytes(), options.max_depth)?;

    let index = match position {
        Ok(i) => {
            let previous = std::mem::replace(&mut leaf.entries[i].1, value);
            write_leaf(store, leaf.id, &leaf.entries)?;
            return Ok(Some(previous));
        }
        Err(i) => i,
    };
    leaf.entries.insert(index, (key.clone(), value));

    for step in path.iter_mut().skip(1) {
        let limits = match step.limits.take() {
            Some(mut limits) => {
                limits.widen(&key);
                limits
            }
            None => Limits::single(&key),
        };
        write_limits(store, step.node, Some(&limits))?;
        step.limits = Some(limits);
    }
    write_limits(store, root, None)?;

    if leaf.entries.len() <= fan_out {
        write_leaf(store, leaf.id, &leaf.entries)?;
        if leaf.id != root {
            write_limits(store, leaf.id, leaf.actual_limits().as_ref())?;
        }
        return Ok(None);
    }

    let right = leaf.entries.split_off(leaf.entries.len() / 2);
    if leaf.id == root {
        let left_id = new_leaf(store, &leaf.entries);
        let right_id = new_leaf(store, &right);
        write_intermediate(store, root, &[left_id, right_id])?;
        debug!(root = ?root, left = ?left_id, right = ?right_id, "split root leaf");
        return Ok(None);
    }

    write_leaf(store, leaf.id, &leaf.entries)?;
    write_limits(store, leaf.id, leaf.actual_limits().as_ref())?;
    let mut new_sibling = new_leaf(store, &right);
    debug!(leaf = ?leaf.id, sibling = ?new_sibling, "split leaf");

    while let Some(mut step) = path.pop() {
        step.kids.insert(step.index + 1, new_sibling);
        if step.kids.len() <= fan_out {
            write_intermediate(store, step.node, &step.kids)?;
            break;
        }
        let right_kids = step.kids.split_off(step.kids.len() / 2);
        let right_limits = kids_limits(&*store, &right_kids)?;
        if step.node == root {
            let left_limits = kids_limits(&*store, &step.kids)?;
            let left_id = new_intermediate(store, &step.kids, left_limits.as_ref());
            let right_id = new_intermediate(store, &right_kids, right_limits.as_ref());
            write_intermediate(store, root, &[left_id, right_id])?;
            debug!(root = ?root, left = ?left_id, right = ?right_id, "split root");
            break;
        }
        write_intermediate(store, step.node, &step.kids)?;
        let left_limits = kids_limits(&*store, &step.kids)?;
        write_limits(store, step.node, left_limits.as_ref())?;
        new_sibling = new_intermediate(store, &right_kids, right_limits.as_ref());
        debug!(node = ?step.node, sibling = ?new_sibling, "split intermediate node");
    }
    Ok(None)
}

/// Delete `key`. Returns `false` if it was not present.
pub(crate) fn remove<S: ObjectStore>(
    store: &mut S,
    root: ObjectId,
    key: &[u8],
    options: &NameTreeOptions,
) -> Result<bool, NameTreeError> {
    let Descent {
        mut path,
        mut leaf,
        position,
    } = descend(&*store, root, key, options.max_depth)?;
    let Ok(index) = position else {
        return Ok(false);
    };
    leaf.entries.remove(index);
    write_leaf(store, leaf.id, &leaf.entries)?;
    if leaf.id == root {
        write_limits(store, root, None)?;
        return Ok(true);
    }

    let mut emptied = leaf.entries.is_empty();
    if !emptied {
        write_limits(store, leaf.id, leaf.actual_limits().as_ref())?;
    }
    let mut child = leaf.id;
    while let Some(mut step) = path.pop() {
        if emptied {
            step.kids.remove(step.index);
            write_intermediate(store, step.node, &step.kids)?;
            debug!(node = ?child, parent = ?step.node, "unlinked empty node");
        }
        if step.node == root {
            if step.kids.is_empty() {
                write_leaf(store, root, &[])?;
            }
            write_limits(store, root, None)?;
            break;
        }
        emptied = step.kids.is_empty();
        if !emptied {
            let limits = kids_limits(&*store, &step.kids)?;
            write_limits(store, step.node, limits.as_ref())?;
        }
        child = step.node;
    }
    Ok(true)
}
