//! Report persistence and console summary

use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::{DomainError, EvaluationReport};

/// Write a report as pretty-printed JSON, creating parent directories
/// as needed.
pub fn write_report(report: &EvaluationReport, path: &Path) -> Result<(), DomainError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                DomainError::storage(format!(
                    "Failed to create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let json = serde_json::to_string_pretty(report)
        .map_err(|e| DomainError::storage(format!("Failed to serialize report: {}", e)))?;

    fs::write(path, json).map_err(|e| {
        DomainError::storage(format!("Failed to write {}: {}", path.display(), e))
    })?;

    info!("Report written to {}", path.display());
    Ok(())
}

/// Render the console summary banner
pub fn render_summary(report: &EvaluationReport) -> String {
    let rule = "=".repeat(50);
    format!(
        "\n{rule}\nHotpotQA {split} Results ({n} examples)\n{rule}\n  \
         Exact Match (EM): {em:.2}%\n  F1 Score:         {f1:.2}%\n{rule}\n",
        rule = rule,
        split = display_split(&report.split),
        n = report.metrics.num_examples,
        em = report.metrics.em,
        f1 = report.metrics.f1,
    )
}

fn display_split(split: &str) -> String {
    let mut chars = split.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Print the summary banner to stdout
pub fn print_summary(report: &EvaluationReport) {
    println!("{}", render_summary(report));
}
