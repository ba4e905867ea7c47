use std::path::Path;

use pdfnametree::{NameTree, NameTreeOptions};

use crate::cli::OutputFormat;
use crate::shared::{
    key_str, open_doc, print_json, reference_str, select_trees, value_json, value_str,
};

pub fn run(
    file: &Path,
    tree: Option<&str>,
    format: &OutputFormat,
    no_repair: bool,
) -> Result<(), i32> {
    let mut doc = open_doc(file)?;
    let trees = select_trees(&doc, tree)?;
    let options = NameTreeOptions::with_auto_repair(!no_repair);

    let mut listed = Vec::with_capacity(trees.len());
    for (name, root) in trees {
        let mut name_tree = NameTree::with_options(&mut doc, root, options.clone());
        let entries = name_tree.as_map().map_err(|e| {
            eprintln!("Error: name tree {name}: {e}");
            1
        })?;
        let state = name_tree.state().to_string();
        listed.push((name, root, state, entries));
    }

    match format {
        OutputFormat::Text => {
            if listed.is_empty() {
                println!("No name trees found.");
            }
            for (name, root, state, entries) in &listed {
                println!(
                    "{name} (root {}, {} entries, {state})",
                    reference_str(*root),
                    entries.len()
                );
                for (key, value) in entries {
                    println!("  {}\t{}", key_str(key), value_str(value));
                }
            }
        }
        OutputFormat::Json => {
            let trees_json: Vec<serde_json::Value> = listed
                .iter()
                .map(|(name, root, state, entries)| {
                    let entries_json: Vec<serde_json::Value> = entries
                        .iter()
                        .map(|(key, value)| {
                            serde_json::json!({
                                "key": key_str(key),
                                "value": value_json(value),
                            })
                        })
                        .collect();
                    serde_json::json!({
                        "name": name,
                        "root": reference_str(*root),
                        "state": state,
                        "entries": entries_json,
                    })
                })
                .collect();
            print_json(&serde_json::json!({ "trees": trees_json }));
        }
    }

    Ok(())
}
