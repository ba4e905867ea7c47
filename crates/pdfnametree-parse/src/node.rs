//! Typed view over name tree node dictionaries.
//!
//! A node is either a [`LeafNode`] (has `/Names`) or an [`IntermediateNode`]
//! (has `/Kids`). Anything else is reported as
//! [`NameTreeError::MalformedNode`]; callers decide whether that triggers a
//! repair. Reads have no side effects. The `write_*` and `new_*` helpers are
//! the only places that turn node contents back into PDF objects.

use lopdf::{Dictionary, Object, ObjectId, StringFormat};
use pdfnametree_core::{Limits, NameKey, NameTreeError};

use crate::store::ObjectStore;

/// A leaf node: sorted `(key, value)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafNode {
    /// Object id of the node dictionary.
    pub id: ObjectId,
    /// Entries in stored order.
    pub entries: Vec<(NameKey, Object)>,
    /// Declared `/Limits`, if any.
    pub limits: Option<Limits>,
}

/// An intermediate node: references to child nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct IntermediateNode {
    /// Object id of the node dictionary.
    pub id: ObjectId,
    /// Child node ids in stored order.
    pub kids: Vec<ObjectId>,
    /// Declared `/Limits`, if any.
    pub limits: Option<Limits>,
}

/// A classified name tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Node with `/Names`.
    Leaf(LeafNode),
    /// Node with `/Kids`.
    Intermediate(IntermediateNode),
}

impl Node {
    /// Object id of the node.
    pub fn id(&self) -> ObjectId {
        match self {
            Node::Leaf(leaf) => leaf.id,
            Node::Intermediate(node) => node.id,
        }
    }

    /// Declared `/Limits`, if any.
    pub fn limits(&self) -> Option<&Limits> {
        match self {
            Node::Leaf(leaf) => leaf.limits.as_ref(),
            Node::Intermediate(node) => node.limits.as_ref(),
        }
    }

    /// Returns `true` for a node without entries or kids.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Leaf(leaf) => leaf.entries.is_empty(),
            Node::Intermediate(node) => node.kids.is_empty(),
        }
    }
}

impl LeafNode {
    /// Keys of the leaf in stored order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &NameKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Limits covering the stored keys, assuming they are sorted.
    pub fn actual_limits(&self) -> Option<Limits> {
        Limits::from_sorted(self.keys())
    }
}

/// Read a PDF string used as a key or limit, resolving one indirection.
fn string_bytes<'a, S: ObjectStore>(store: &'a S, obj: &'a Object) -> Option<&'a [u8]> {
    match store.resolve(obj)? {
        Object::String(bytes, _) => Some(bytes.as_slice()),
        _ => None,
    }
}

/// Read only the `/Limits` entry of a node.
///
/// # Errors
///
/// Returns [`NameTreeError::MalformedNode`] if `/Limits` is present but is
/// not an array of two strings.
pub fn read_limits<S: ObjectStore>(
    store: &S,
    id: ObjectId,
) -> Result<Option<Limits>, NameTreeError> {
    let Some(entry) = store.get_key(id, b"Limits") else {
        return Ok(None);
    };
    let items = store
        .get_array_items(entry)
        .ok_or_else(|| NameTreeError::malformed(id, "/Limits is not an array"))?;
    if items.len() != 2 {
        return Err(NameTreeError::malformed(
            id,
            format!("/Limits has {} elements, expected 2", items.len()),
        ));
    }
    let min = string_bytes(store, &items[0])
        .ok_or_else(|| NameTreeError::malformed(id, "/Limits minimum is not a string"))?;
    let max = string_bytes(store, &items[1])
        .ok_or_else(|| NameTreeError::malformed(id, "/Limits maximum is not a string"))?;
    Ok(Some(Limits::new(min, max)))
}

fn read_entries<S: ObjectStore>(
    store: &S,
    id: ObjectId,
    names: &Object,
) -> Result<Vec<(NameKey, Object)>, NameTreeError> {
    let items = store
        .get_array_items(names)
        .ok_or_else(|| NameTreeError::malformed(id, "/Names is not an array"))?;
    if items.len() % 2 != 0 {
        return Err(NameTreeError::malformed(
            id,
            format!("/Names has odd length {}", items.len()),
        ));
    }
    items
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            let key = string_bytes(store, &pair[0]).ok_or_else(|| {
                NameTreeError::malformed(id, format!("/Names key {i} is not a string"))
            })?;
            Ok((NameKey::from(key), pair[1].clone()))
        })
        .collect()
}

fn read_kids<S: ObjectStore>(
    store: &S,
    id: ObjectId,
    kids: &Object,
) -> Result<Vec<ObjectId>, NameTreeError> {
    let items = store
        .get_array_items(kids)
        .ok_or_else(|| NameTreeError::malformed(id, "/Kids is not an array"))?;
    items
        .iter()
        .enumerate()
        .map(|(i, kid)| match kid {
            Object::Reference(kid_id) => Ok(*kid_id),
            _ => Err(NameTreeError::malformed(
                id,
                format!("/Kids entry {i} is not an indirect reference"),
            )),
        })
        .collect()
}

/// Classify and read a node.
///
/// # Errors
///
/// Returns [`NameTreeError::MalformedNode`] if the object is missing, is not
/// a dictionary, has neither or both of `/Kids` and `/Names`, or has a
/// malformed `/Kids`, `/Names` or `/Limits` entry.
pub fn read_node<S: ObjectStore>(store: &S, id: ObjectId) -> Result<Node, NameTreeError> {
    if !store.is_dictionary(id) {
        return Err(NameTreeError::malformed(id, "object is missing or not a dictionary"));
    }
    let kids = store.get_key(id, b"Kids");
    let names = store.get_key(id, b"Names");
    let limits = read_limits(store, id)?;
    match (kids, names) {
        (Some(_), Some(_)) => Err(NameTreeError::malformed(id, "node has both /Kids and /Names")),
        (None, None) => Err(NameTreeError::malformed(id, "node has neither /Kids nor /Names")),
        (Some(kids), None) => Ok(Node::Intermediate(IntermediateNode {
            id,
            kids: read_kids(store, id, kids)?,
            limits,
        })),
        (None, Some(names)) => Ok(Node::Leaf(LeafNode {
            id,
            entries: read_entries(store, id, names)?,
            limits,
        })),
    }
}

/// Read the root node of a tree.
///
/// Same as [`read_node`], except that a dictionary with neither `/Kids` nor
/// `/Names` is an empty tree and reads as an empty leaf.
pub fn read_root<S: ObjectStore>(store: &S, id: ObjectId) -> Result<Node, NameTreeError> {
    if store.is_dictionary(id)
        && store.get_key(id, b"Kids").is_none()
        && store.get_key(id, b"Names").is_none()
    {
        return Ok(Node::Leaf(LeafNode {
            id,
            entries: Vec::new(),
            limits: read_limits(store, id)?,
        }));
    }
    read_node(store, id)
}

/// Encode a key as a literal PDF string.
pub fn key_object(key: &NameKey) -> Object {
    Object::String(key.as_bytes().to_vec(), StringFormat::Literal)
}

/// Encode limits as a `/Limits` array.
pub fn limits_object(limits: &Limits) -> Object {
    Object::Array(vec![key_object(&limits.min), key_object(&limits.max)])
}

/// Flatten entries into a `/Names` array.
pub fn names_object<S: ObjectStore>(store: &S, entries: &[(NameKey, Object)]) -> Object {
    let mut items = Vec::with_capacity(entries.len() * 2);
    for (key, value) in entries {
        items.push(key_object(key));
        items.push(value.clone());
    }
    store.make_array(items)
}

/// Build a `/Kids` array.
pub fn kids_object<S: ObjectStore>(store: &S, kids: &[ObjectId]) -> Object {
    store.make_array(kids.iter().map(|id| Object::Reference(*id)).collect())
}

/// Set or clear the `/Limits` of a node.
pub fn write_limits<S: ObjectStore>(
    store: &mut S,
    id: ObjectId,
    limits: Option<&Limits>,
) -> Result<(), NameTreeError> {
    match limits {
        Some(limits) => store.set_key(id, b"Limits", limits_object(limits))?,
        None => {
            store.remove_key(id, b"Limits")?;
        }
    }
    Ok(())
}

/// Make `id` a leaf holding `entries`, dropping any `/Kids`.
pub fn write_leaf<S: ObjectStore>(
    store: &mut S,
    id: ObjectId,
    entries: &[(NameKey, Object)],
) -> Result<(), NameTreeError> {
    let names = names_object(&*store, entries);
    store.set_key(id, b"Names", names)?;
    store.remove_key(id, b"Kids")?;
    Ok(())
}

/// Make `id` an intermediate node over `kids`, dropping any `/Names`.
pub fn write_intermediate<S: ObjectStore>(
    store: &mut S,
    id: ObjectId,
    kids: &[ObjectId],
) -> Result<(), NameTreeError> {
    let kids = kids_object(&*store, kids);
    store.set_key(id, b"Kids", kids)?;
    store.remove_key(id, b"Names")?;
    Ok(())
}

/// Create a new leaf object with exact `/Limits`.
pub fn new_leaf<S: ObjectStore>(store: &mut S, entries: &[(NameKey, Object)]) -> ObjectId {
    let mut dict = Dictionary::new();
    dict.set("Names", names_object(&*store, entries));
    if let Some(limits) = Limits::from_sorted(entries.iter().map(|(key, _)| key)) {
        dict.set("Limits", limits_object(&limits));
    }
    store.make_dictionary(dict)
}

/// Create a new intermediate object with the given `/Limits`.
pub fn new_intermediate<S: ObjectStore>(
    store: &mut S,
    kids: &[ObjectId],
    limits: Option<&Limits>,
) -> ObjectId {
    let mut dict = Dictionary::new();
    dict.set("Kids", kids_object(&*store, kids));
    if let Some(limits) = limits {
        dict.set("Limits", limits_object(limits));
    }
    store.make_dictionary(dict)
}
