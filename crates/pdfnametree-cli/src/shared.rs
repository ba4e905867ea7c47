use std::path::Path;

use lopdf::{Document, Object, ObjectId};
use pdfnametree::{NameKey, catalog};

/// Open a PDF file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not found
/// or cannot be parsed as a valid PDF. Direct name tree roots are moved into
/// indirect objects so every category can be opened as a tree.
pub fn open_doc(file: &Path) -> Result<Document, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    let mut doc = Document::load(file).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })?;
    catalog::promote_direct_roots(&mut doc).map_err(|e| {
        eprintln!("Error: failed to read the /Names dictionary: {e}");
        1
    })?;
    Ok(doc)
}

/// Resolve the trees to operate on: one named category, or all of them.
pub fn select_trees(doc: &Document, tree: Option<&str>) -> Result<Vec<(String, ObjectId)>, i32> {
    match tree {
        Some(name) => match catalog::name_tree_root(doc, name.as_bytes()) {
            Some(root) => Ok(vec![(name.to_string(), root)]),
            None => {
                eprintln!("Error: no name tree named {name}");
                Err(1)
            }
        },
        None => Ok(catalog::name_trees(doc)),
    }
}

/// Format an object reference the way PDF writes it.
pub fn reference_str(id: ObjectId) -> String {
    format!("{} {} R", id.0, id.1)
}

/// Human-readable form of a key.
pub fn key_str(key: &NameKey) -> String {
    key.to_text_lossy()
}

/// Short PDF-like rendering of a value for text output.
pub fn value_str(obj: &Object) -> String {
    match obj {
        Object::Null => "null".to_string(),
        Object::Boolean(b) => b.to_string(),
        Object::Integer(i) => i.to_string(),
        Object::Real(r) => r.to_string(),
        Object::Name(name) => format!("/{}", String::from_utf8_lossy(name)),
        Object::String(bytes, _) => {
            format!("({})", NameKey::from(bytes.as_slice()).to_text_lossy())
        }
        Object::Array(items) => {
            let items: Vec<String> = items.iter().map(value_str).collect();
            format!("[{}]", items.join(" "))
        }
        Object::Dictionary(dict) => {
            let entries: Vec<String> = dict
                .iter()
                .map(|(k, v)| format!("/{} {}", String::from_utf8_lossy(k), value_str(v)))
                .collect();
            format!("<< {} >>", entries.join(" "))
        }
        Object::Stream(stream) => format!("<stream, {} bytes>", stream.content.len()),
        Object::Reference(id) => reference_str(*id),
    }
}

/// JSON rendering of a value.
///
/// References become `"N G R"` strings, strings are decoded as PDF text and
/// names keep their leading slash.
pub fn value_json(obj: &Object) -> serde_json::Value {
    match obj {
        Object::Null => serde_json::Value::Null,
        Object::Boolean(b) => serde_json::json!(b),
        Object::Integer(i) => serde_json::json!(i),
        Object::Real(r) => serde_json::json!(r),
        Object::Name(name) => serde_json::json!(format!("/{}", String::from_utf8_lossy(name))),
        Object::String(bytes, _) => {
            serde_json::json!(NameKey::from(bytes.as_slice()).to_text_lossy())
        }
        Object::Array(items) => serde_json::Value::Array(items.iter().map(value_json).collect()),
        Object::Dictionary(dict) => serde_json::Value::Object(
            dict.iter()
                .map(|(k, v)| (String::from_utf8_lossy(k).into_owned(), value_json(v)))
                .collect(),
        ),
        Object::Stream(stream) => serde_json::json!({ "stream_length": stream.content.len() }),
        Object::Reference(id) => serde_json::json!(reference_str(*id)),
    }
}

/// Print a JSON value to stdout, pretty-printed.
pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Error: failed to serialize output: {e}"),
    }
}
