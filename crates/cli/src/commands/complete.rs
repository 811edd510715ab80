use crate::commands::common::{open_file, CommandContext};
use crate::{ExitCode, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use mapper_types::Position;
use std::path::{Path, PathBuf};

/// Print parameter completions at a 1-based line and column.
pub fn run(
    config_path: Option<PathBuf>,
    file: &Path,
    line: u32,
    character: u32,
    format: OutputFormat,
) -> Result<ExitCode> {
    let (mut host, _) = CommandContext::load(config_path)?.load_host()?;
    let uri = open_file(&mut host, file)?;

    let position = Position::new(line.saturating_sub(1), character.saturating_sub(1));
    let list = host
        .snapshot()
        .completions(&uri, position)
        .unwrap_or_default();
    tracing::debug!(%position, items = list.items.len(), "Completed");

    match format {
        OutputFormat::Human => {
            let mut shown = 0;
            for item in list.visible() {
                shown += 1;
                println!(
                    "{}  {}  {}",
                    item.label.bold(),
                    item.kind.to_string().cyan(),
                    item.detail.as_deref().unwrap_or_default().dimmed()
                );
            }
            if shown == 0 {
                println!("{}", "No completions".yellow());
            }
        }
        OutputFormat::Json => {
            let items: Vec<serde_json::Value> = list
                .items
                .iter()
                .map(|item| {
                    serde_json::json!({
                        "label": item.label,
                        "kind": item.kind.to_string(),
                        "detail": item.detail,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "prefix": list.prefix_filter,
                "items": items,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(ExitCode::Success)
}
