//! Add a named destination pointing at the first page and save a copy.
//!
//! Usage: `cargo run --example add_destination -- <input.pdf> <name> <output.pdf>`

use pdfnametree::{NameTree, catalog, lopdf::{Document, Object}};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: add_destination <input.pdf> <name> <output.pdf>");
        std::process::exit(1);
    }

    let mut doc = Document::load(&args[1]).unwrap_or_else(|e| {
        eprintln!("Error opening PDF: {e}");
        std::process::exit(1);
    });
    let Some(&page) = doc.get_pages().values().next() else {
        eprintln!("Document has no pages");
        std::process::exit(1);
    };

    let root = catalog::ensure_name_tree(&mut doc, b"Dests").unwrap();
    let mut tree = NameTree::new(&mut doc, root, true);
    let destination = Object::Array(vec![Object::Reference(page), Object::Name(b"Fit".to_vec())]);
    match tree.set(args[2].as_str(), destination).unwrap() {
        Some(old) => println!("Replaced {} (was {old:?})", args[2]),
        None => println!("Added {}", args[2]),
    }
    println!("Dests now holds {} entries", tree.len().unwrap());

    doc.save(&args[3]).unwrap();
}
