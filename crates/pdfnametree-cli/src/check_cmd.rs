use std::path::Path;

use pdfnametree::{NameTree, Severity};

use crate::cli::OutputFormat;
use crate::shared::{open_doc, print_json, reference_str, select_trees};

/// Report validation issues for every name tree.
///
/// Issues are findings, not failures: the exit status is 0 whenever the file
/// could be read.
pub fn run(file: &Path, format: &OutputFormat) -> Result<(), i32> {
    let mut doc = open_doc(file)?;
    let trees = select_trees(&doc, None)?;

    let mut found = Vec::new();
    for (name, root) in trees {
        let issues = NameTree::new(&mut doc, root, false).validate();
        found.extend(issues.into_iter().map(|issue| (name.clone(), issue)));
    }

    let error_count = found.iter().filter(|(_, i)| i.is_error()).count();
    let warning_count = found.iter().filter(|(_, i)| i.is_warning()).count();

    match format {
        OutputFormat::Text => {
            if found.is_empty() {
                println!("No issues found.");
            } else {
                for (tree, issue) in &found {
                    let severity = match issue.severity {
                        Severity::Error => "ERROR",
                        Severity::Warning => "WARNING",
                    };
                    print!("[{severity}] {tree}: {}: {}", issue.code, issue.message);
                    if let Some(node) = issue.node {
                        print!(" (at {})", reference_str(node));
                    }
                    println!();
                }
                println!();
                println!("Summary: {error_count} error(s), {warning_count} warning(s)");
            }
        }
        OutputFormat::Json => {
            let issues_json: Vec<serde_json::Value> = found
                .iter()
                .map(|(tree, issue)| {
                    let mut obj = serde_json::json!({
                        "tree": tree,
                        "severity": issue.severity.to_string(),
                        "code": issue.code.as_str(),
                        "message": issue.message,
                    });
                    if let Some(node) = issue.node {
                        obj["node"] = serde_json::json!(reference_str(node));
                    }
                    obj
                })
                .collect();

            print_json(&serde_json::json!({
                "issues": issues_json,
                "summary": {
                    "errors": error_count,
                    "warnings": warning_count,
                },
            }));
        }
    }

    Ok(())
}
