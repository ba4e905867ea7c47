use std::path::Path;

use pdfnametree::NameTree;

use crate::cli::OutputFormat;
use crate::shared::{open_doc, print_json, select_trees, value_json, value_str};

pub fn run(file: &Path, tree: &str, key: &str, format: &OutputFormat) -> Result<(), i32> {
    let mut doc = open_doc(file)?;
    let Some((_, root)) = select_trees(&doc, Some(tree))?.into_iter().next() else {
        return Err(1);
    };

    let mut name_tree = NameTree::new(&mut doc, root, true);
    let value = name_tree.find(key).map_err(|e| {
        eprintln!("Error: name tree {tree}: {e}");
        1
    })?;
    let Some(value) = value else {
        eprintln!("Error: key not found: {key:?}");
        return Err(1);
    };

    match format {
        OutputFormat::Text => println!("{}", value_str(&value)),
        OutputFormat::Json => print_json(&serde_json::json!({
            "tree": tree,
            "key": key,
            "value": value_json(&value),
        })),
    }
    Ok(())
}
