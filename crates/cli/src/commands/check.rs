//! Report `resultMap` references that do not resolve.
//!
//! A reference resolves against the file it appears in, then against every
//! other mapper file with the same namespace. Anything left over is printed
//! as a warning and the command exits with status 1.

use crate::commands::common::CommandContext;
use crate::{ExitCode, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use mapper_ide::Diagnostic;
use mapper_types::FileUri;
use std::path::PathBuf;

pub fn run(config_path: Option<PathBuf>, format: OutputFormat) -> Result<ExitCode> {
    let start_time = std::time::Instant::now();

    let (host, summary) = CommandContext::load(config_path)?.load_host()?;
    if matches!(format, OutputFormat::Human) {
        println!(
            "{}",
            format!(
                "✓ Loaded {} mapper file(s) and {} class(es)",
                summary.mapper_files, summary.classes
            )
            .green()
        );
        if summary.skipped_files > 0 {
            println!(
                "{}",
                format!("⚠ Skipped {} unreadable file(s)", summary.skipped_files).yellow()
            );
        }
    }

    let mut files = host.snapshot().all_diagnostics();
    files.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));
    let total_warnings: usize = files.iter().map(|(_, diagnostics)| diagnostics.len()).sum();

    match format {
        OutputFormat::Human => {
            for (file, diagnostics) in &files {
                for diagnostic in diagnostics {
                    print_human(file, diagnostic);
                }
            }

            println!();
            if total_warnings == 0 {
                println!("{}", "✓ All result maps resolve".green().bold());
            } else {
                println!(
                    "{}",
                    format!(
                        "✗ Found {total_warnings} unresolved result map(s) in {} file(s)",
                        files.len()
                    )
                    .red()
                );
            }
            println!(
                "  {} total: {:.2}s",
                "⏱".dimmed(),
                start_time.elapsed().as_secs_f64()
            );
        }
        OutputFormat::Json => {
            let files_json: Vec<serde_json::Value> = files
                .iter()
                .map(|(file, diagnostics)| {
                    serde_json::json!({
                        "file": file.path_str(),
                        "warnings": diagnostics.iter().map(diagnostic_to_json).collect::<Vec<_>>(),
                    })
                })
                .collect();
            let output = serde_json::json!({
                "success": total_warnings == 0,
                "files": files_json,
                "stats": {
                    "mapper_files": summary.mapper_files,
                    "total_warnings": total_warnings,
                }
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    if total_warnings > 0 {
        return Ok(ExitCode::Findings);
    }
    Ok(ExitCode::Success)
}

fn print_human(file: &FileUri, diagnostic: &Diagnostic) {
    println!(
        "\n{}:{}: {} {}",
        file.path_str(),
        diagnostic.range.start,
        format!("{}:", diagnostic.severity).yellow().bold(),
        diagnostic.message.yellow()
    );
    if let Some(ref code) = diagnostic.code {
        println!("  {}: {}", "rule".dimmed(), code.dimmed());
    }
}

fn diagnostic_to_json(diagnostic: &Diagnostic) -> serde_json::Value {
    let range = diagnostic.range;
    serde_json::json!({
        "message": diagnostic.message,
        "severity": diagnostic.severity.to_string(),
        "rule": diagnostic.code,
        "location": {
            "start": { "line": range.start.line + 1, "column": range.start.character + 1 },
            "end": { "line": range.end.line + 1, "column": range.end.character + 1 },
        }
    })
}
