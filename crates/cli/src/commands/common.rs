use anyhow::{Context, Result};
use mapper_config::{find_config, load_config, MapperConfig};
use mapper_ide::{AnalysisHost, LoadSummary};
use mapper_types::FileUri;
use std::path::{Path, PathBuf};

/// Config and base directory shared by every command that loads a project
pub struct CommandContext {
    pub config: MapperConfig,
    pub base_dir: PathBuf,
}

impl CommandContext {
    /// Load the config named by `--config`, or the nearest one above the
    /// current directory.
    ///
    /// Without any config file the defaults apply and patterns are resolved
    /// against the current directory.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to read current directory")?;

        let config_path = match config_path {
            Some(path) => Some(path),
            None => find_config(&current_dir).context("Failed to search for config")?,
        };

        let Some(config_path) = config_path else {
            tracing::info!(dir = %current_dir.display(), "No config file found, using defaults");
            return Ok(Self {
                config: MapperConfig::default(),
                base_dir: current_dir,
            });
        };

        let config = load_config(&config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?;

        let config_path = std::path::absolute(&config_path)
            .with_context(|| format!("Failed to resolve {}", config_path.display()))?;
        let base_dir = config_path
            .parent()
            .context("Failed to get config directory")?
            .to_path_buf();

        Ok(Self { config, base_dir })
    }

    /// Load the project's mapper files and type model.
    pub fn load_host(self) -> Result<(AnalysisHost, LoadSummary)> {
        let mut host = AnalysisHost::new();
        let summary = host
            .load(self.config, &self.base_dir)
            .context("Failed to load project")?;
        Ok((host, summary))
    }
}

/// Register `path` with the host, reading it from disk.
///
/// Files outside the configured mapper patterns are added so commands can
/// still answer for them.
pub fn open_file(host: &mut AnalysisHost, path: &Path) -> Result<FileUri> {
    let path = std::path::absolute(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let uri = FileUri::from_path(&path);
    host.add_file(uri.clone(), &text);
    Ok(uri)
}
