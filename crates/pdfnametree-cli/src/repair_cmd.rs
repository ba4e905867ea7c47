use std::path::Path;

use pdfnametree::{NameTree, NameTreeOptions};
use tracing::info;

use crate::cli::OutputFormat;
use crate::shared::{open_doc, print_json, select_trees};

pub fn run(file: &Path, output: &Path, fan_out: usize, format: &OutputFormat) -> Result<(), i32> {
    let mut doc = open_doc(file)?;
    let trees = select_trees(&doc, None)?;
    let options = NameTreeOptions::default().fan_out(fan_out);

    let mut reports = Vec::with_capacity(trees.len());
    for (name, root) in trees {
        let mut name_tree = NameTree::with_options(&mut doc, root, options.clone());
        let report = name_tree.repair().map_err(|e| {
            eprintln!("Error: name tree {name}: {e}");
            1
        })?;
        info!(tree = %name, %report, "repaired");
        reports.push((name, report));
    }

    doc.save(output).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", output.display());
        1
    })?;

    match format {
        OutputFormat::Text => {
            if reports.is_empty() {
                println!("No name trees found.");
            }
            for (name, report) in &reports {
                println!("{name}: {report}");
                for line in &report.log {
                    println!("  {line}");
                }
            }
            println!("Wrote {}", output.display());
        }
        OutputFormat::Json => {
            let trees_json: Vec<serde_json::Value> = reports
                .iter()
                .map(|(name, report)| {
                    let mut obj = serde_json::to_value(report).unwrap_or_default();
                    obj["name"] = serde_json::json!(name);
                    obj
                })
                .collect();
            print_json(&serde_json::json!({
                "output": output.display().to_string(),
                "trees": trees_json,
            }));
        }
    }
    Ok(())
}
