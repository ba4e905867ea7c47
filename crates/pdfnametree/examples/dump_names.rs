//! Print every name tree of a PDF document with its entries.
//!
//! Usage: `cargo run --example dump_names -- <path-to-pdf>`

use pdfnametree::{NameTree, catalog, lopdf::Document};

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: dump_names <path-to-pdf>");
        std::process::exit(1);
    });

    let mut doc = Document::load(&path).unwrap_or_else(|e| {
        eprintln!("Error opening PDF: {e}");
        std::process::exit(1);
    });
    catalog::promote_direct_roots(&mut doc).unwrap();

    for (name, root) in catalog::name_trees(&doc) {
        let mut tree = NameTree::new(&mut doc, root, true);
        let map = tree.as_map().unwrap();
        println!("--- {name} ({} entries, {}) ---", map.len(), tree.state());
        for (key, value) in map {
            println!("{key}\t{value:?}");
        }
        println!();
    }
}
