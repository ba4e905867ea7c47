//! PDF fixtures shared by the CLI integration tests.

#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use lopdf::{Document, Object, ObjectId, StringFormat, dictionary};

pub fn cmd() -> Command {
    Command::cargo_bin("pdfnametree").unwrap()
}

pub fn s(text: &str) -> Object {
    Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
}

/// A one-page document; returns it with the page and page tree ids.
fn base_doc() -> (Document, ObjectId, ObjectId) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        }),
    );
    (doc, page_id, pages_id)
}

/// Attach `names` as the catalog's `/Names` dictionary and serialize.
fn finish(mut doc: Document, pages_id: ObjectId, names: lopdf::Dictionary) -> Vec<u8> {
    let names_id = doc.add_object(names);
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
        "Names" => Object::Reference(names_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// `/Dests` with two destinations in one leaf and a two-level `/JavaScript` tree.
pub fn valid_pdf() -> Vec<u8> {
    let (mut doc, page, pages) = base_doc();
    let dests = doc.add_object(dictionary! {
        "Names" => vec![
            s("chapter1"),
            Object::Array(vec![Object::Reference(page), "Fit".into()]),
            s("chapter2"),
            Object::Array(vec![
                Object::Reference(page),
                "XYZ".into(),
                Object::Null,
                Object::Integer(700),
                Object::Null,
            ]),
        ],
    });
    let js_a = doc.add_object(dictionary! {
        "Names" => vec![s("init"), Object::Integer(1)],
        "Limits" => vec![s("init"), s("init")],
    });
    let js_b = doc.add_object(dictionary! {
        "Names" => vec![s("print"), Object::Integer(2), s("zoom"), Object::Integer(3)],
        "Limits" => vec![s("print"), s("zoom")],
    });
    let js = doc.add_object(dictionary! {
        "Kids" => vec![Object::Reference(js_a), Object::Reference(js_b)],
    });
    finish(
        doc,
        pages,
        dictionary! {
            "Dests" => Object::Reference(dests),
            "JavaScript" => Object::Reference(js),
        },
    )
}

/// `/Dests` stored as a direct dictionary whose keys are out of order and
/// repeated.
pub fn broken_pdf() -> Vec<u8> {
    let (doc, _, pages) = base_doc();
    finish(
        doc,
        pages,
        dictionary! {
            "Dests" => dictionary! {
                "Names" => vec![
                    s("b"), Object::Integer(2),
                    s("a"), Object::Integer(1),
                    s("b"), Object::Integer(99),
                ],
            },
        },
    )
}

/// A document without a `/Names` dictionary.
pub fn plain_pdf() -> Vec<u8> {
    let (mut doc, _, pages_id) = base_doc();
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

pub fn write_temp_pdf(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(bytes).unwrap();
    tmp.flush().unwrap();
    tmp
}

pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    serde_json::from_str(&stdout).unwrap()
}
