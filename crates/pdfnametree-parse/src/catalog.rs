//! Locating name trees through the document catalog.
//!
//! The catalog's `/Names` dictionary maps a category (`/Dests`,
//! `/EmbeddedFiles`, `/JavaScript`, ...) to the root node of a name tree.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use tracing::debug;

use crate::error::BackendError;

/// Object id of the document catalog.
fn catalog_id(doc: &Document) -> Result<ObjectId, BackendError> {
    let root = doc.trailer.get(b"Root")?;
    Ok(root.as_reference()?)
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// The catalog's `/Names` dictionary, if present.
pub fn names_dictionary(doc: &Document) -> Option<&Dictionary> {
    let catalog = doc.get_object(catalog_id(doc).ok()?).ok()?.as_dict().ok()?;
    resolve(doc, catalog.get(b"Names").ok()?)?.as_dict().ok()
}

/// Root object id of the name tree stored under `category`.
///
/// Returns `None` if the category is absent or its root is not an indirect
/// object (see [`promote_direct_roots`]).
pub fn name_tree_root(doc: &Document, category: &[u8]) -> Option<ObjectId> {
    match names_dictionary(doc)?.get(category).ok()? {
        Object::Reference(id) => Some(*id),
        _ => None,
    }
}

/// All categories whose root is an indirect object, in dictionary order.
pub fn name_trees(doc: &Document) -> Vec<(String, ObjectId)> {
    let Some(names) = names_dictionary(doc) else {
        return Vec::new();
    };
    names
        .iter()
        .filter_map(|(category, value)| match value {
            Object::Reference(id) => Some((String::from_utf8_lossy(category).into_owned(), *id)),
            _ => None,
        })
        .collect()
}

/// Get the `/Names` dictionary's object id, creating it (and moving a direct
/// `/Names` dictionary out of the catalog) as needed.
fn ensure_names_dictionary(doc: &mut Document) -> Result<ObjectId, BackendError> {
    let catalog_id = catalog_id(doc)?;
    let existing = doc
        .get_object(catalog_id)?
        .as_dict()?
        .get(b"Names")
        .ok()
        .cloned();
    let names_id = match existing {
        Some(Object::Reference(id)) => id,
        Some(Object::Dictionary(dict)) => doc.add_object(dict),
        _ => doc.add_object(dictionary! {}),
    };
    doc.get_object_mut(catalog_id)?
        .as_dict_mut()?
        .set("Names", Object::Reference(names_id));
    Ok(names_id)
}

/// Move direct name tree roots in `/Names` into indirect objects.
///
/// Returns the number of roots moved.
pub fn promote_direct_roots(doc: &mut Document) -> Result<usize, BackendError> {
    if names_dictionary(doc).is_none() {
        return Ok(0);
    }
    let names_id = ensure_names_dictionary(doc)?;
    let direct: Vec<(Vec<u8>, Dictionary)> = doc
        .get_object(names_id)?
        .as_dict()?
        .iter()
        .filter_map(|(category, value)| match value {
            Object::Dictionary(dict) => Some((category.clone(), dict.clone())),
            _ => None,
        })
        .collect();
    let moved = direct.len();
    for (category, dict) in direct {
        let root = doc.add_object(dict);
        debug!(
            category = %String::from_utf8_lossy(&category),
            root = ?root,
            "moved direct name tree root into an indirect object"
        );
        doc.get_object_mut(names_id)?
            .as_dict_mut()?
            .set(category, Object::Reference(root));
    }
    Ok(moved)
}

/// Root of the name tree under `category`, creating an empty tree if absent.
pub fn ensure_name_tree(doc: &mut Document, category: &[u8]) -> Result<ObjectId, BackendError> {
    promote_direct_roots(doc)?;
    if let Some(root) = name_tree_root(doc, category) {
        return Ok(root);
    }
    let names_id = ensure_names_dictionary(doc)?;
    let root = doc.add_object(dictionary! { "Names" => Vec::<Object>::new() });
    doc.get_object_mut(names_id)?
        .as_dict_mut()?
        .set(category.to_vec(), Object::Reference(root));
    debug!(category = %String::from_utf8_lossy(category), root = ?root, "created name tree");
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_names(names: Object) -> Document {
        let mut doc = Document::with_version("1.5");
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Names" => names,
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc
    }

    fn empty_doc() -> Document {
        let mut doc = Document::with_version("1.5");
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog" });
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc
    }

    #[test]
    fn finds_indirect_roots() {
        let mut doc = empty_doc();
        let dests = doc.add_object(dictionary! { "Names" => Vec::<Object>::new() });
        let names_id = doc.add_object(dictionary! { "Dests" => Object::Reference(dests) });
        let catalog_id = catalog_id(&doc).unwrap();
        doc.get_object_mut(catalog_id)
            .unwrap()
            .as_dict_mut()
            .unwrap()
            .set("Names", Object::Reference(names_id));

        assert_eq!(name_tree_root(&doc, b"Dests"), Some(dests));
        assert_eq!(name_tree_root(&doc, b"JavaScript"), None);
        assert_eq!(name_trees(&doc), vec![("Dests".to_string(), dests)]);
    }

    #[test]
    fn no_names_dictionary() {
        let doc = empty_doc();
        assert!(names_dictionary(&doc).is_none());
        assert!(name_trees(&doc).is_empty());
    }

    #[test]
    fn missing_trailer_root_yields_nothing() {
        let doc = Document::with_version("1.5");
        assert!(names_dictionary(&doc).is_none());
    }

    #[test]
    fn promote_direct_root() {
        let mut doc = doc_with_names(Object::Dictionary(dictionary! {
            "EmbeddedFiles" => dictionary! { "Names" => Vec::<Object>::new() },
        }));
        assert!(name_tree_root(&doc, b"EmbeddedFiles").is_none());
        assert_eq!(promote_direct_roots(&mut doc).unwrap(), 1);
        let root = name_tree_root(&doc, b"EmbeddedFiles").unwrap();
        assert!(doc.get_object(root).unwrap().as_dict().unwrap().has(b"Names"));
    }

    #[test]
    fn ensure_creates_missing_tree() {
        let mut doc = empty_doc();
        let root = ensure_name_tree(&mut doc, b"JavaScript").unwrap();
        assert_eq!(name_tree_root(&doc, b"JavaScript"), Some(root));
        assert_eq!(ensure_name_tree(&mut doc, b"JavaScript").unwrap(), root);
    }

    #[test]
    fn ensure_without_catalog_fails() {
        let mut doc = Document::with_version("1.5");
        assert!(ensure_name_tree(&mut doc, b"Dests").is_err());
    }
}
