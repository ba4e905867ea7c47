//! Shared helpers for building name tree documents in integration tests.

#![allow(dead_code)]

use lopdf::{Document, Object, ObjectId, StringFormat, dictionary};

/// A literal PDF string.
pub fn s(text: &str) -> Object {
    Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
}

/// Document with a catalog and nothing else.
pub fn empty_doc() -> Document {
    let mut doc = Document::with_version("1.7");
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog" });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc
}

/// Add a leaf whose values are the keys' own strings.
///
/// `Limits` are written only when `with_limits` is set and the leaf is
/// non-empty.
pub fn leaf(doc: &mut Document, keys: &[&str], with_limits: bool) -> ObjectId {
    let mut names = Vec::with_capacity(keys.len() * 2);
    for key in keys {
        names.push(s(key));
        names.push(s(key));
    }
    let mut dict = dictionary! { "Names" => names };
    if with_limits {
        if let (Some(first), Some(last)) = (keys.first(), keys.last()) {
            dict.set("Limits", vec![s(first), s(last)]);
        }
    }
    doc.add_object(dict)
}

/// Add an intermediate node with the given kids and limits.
pub fn intermediate(
    doc: &mut Document,
    kids: &[ObjectId],
    limits: Option<(&str, &str)>,
) -> ObjectId {
    let mut dict = dictionary! {
        "Kids" => kids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
    };
    if let Some((min, max)) = limits {
        dict.set("Limits", vec![s(min), s(max)]);
    }
    doc.add_object(dict)
}

/// Keys of a map as UTF-8 strings, in map order.
pub fn key_strings<'a>(keys: impl IntoIterator<Item = &'a pdfnametree::NameKey>) -> Vec<String> {
    keys.into_iter().map(|k| k.to_text_lossy()).collect()
}

/// Save and reload a document, as a writer and a later reader would.
pub fn reload(doc: &mut Document) -> Document {
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    Document::load_mem(&buf).unwrap()
}
