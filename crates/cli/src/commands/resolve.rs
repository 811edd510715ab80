use crate::commands::common::{open_file, CommandContext};
use crate::ExitCode;
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Print `path:line:column` of the `<resultMap>` that `id` names from `file`.
pub fn run(config_path: Option<PathBuf>, file: &Path, id: &str) -> Result<ExitCode> {
    let (mut host, _) = CommandContext::load(config_path)?.load_host()?;
    let uri = open_file(&mut host, file)?;

    match host.snapshot().resolve_result_map(&uri, id) {
        Some(location) => {
            println!("{}:{}", location.file.path_str(), location.range.start);
            Ok(ExitCode::Success)
        }
        None => {
            eprintln!("{} Result map '{id}' is not defined", "✗".red());
            Ok(ExitCode::Findings)
        }
    }
}
