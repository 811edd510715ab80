use crate::{ConfigError, MapperConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
const CONFIG_FILES: &[&str] = &[
    ".mapperrc.yml",
    ".mapperrc.yaml",
    ".mapperrc.json",
    ".mapperrc",
    "mapper.config.yml",
    "mapper.config.yaml",
    "mapper.config.json",
];

/// Find a config file by walking up the directory tree from the given start directory.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a config from the specified path.
/// Automatically detects the format based on file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<MapperConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        placeholder = %config.completion.placeholder.escape_debug(),
        max_depth = config.completion.max_depth,
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<MapperConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "" if file_name == ".mapperrc" => {
            tracing::trace!("Trying YAML then JSON for .mapperrc");
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;
    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<MapperConfig> {
    // An empty YAML document means "all defaults"
    if contents.trim().is_empty() {
        return Ok(MapperConfig::default());
    }
    serde_yaml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<MapperConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

fn validate_config(config: &MapperConfig, path: &Path) -> Result<()> {
    let invalid = |message: &str| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: message.to_string(),
    };

    let mapper_patterns = config.mappers.patterns();
    if mapper_patterns.is_empty() || mapper_patterns.iter().any(|p| p.trim().is_empty()) {
        return Err(invalid("mapper patterns must not be empty"));
    }

    if let Some(types) = &config.types {
        let type_patterns = types.patterns();
        if type_patterns.is_empty() || type_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid("type model patterns must not be empty"));
        }
    }

    let completion = &config.completion;
    if completion.placeholder_trimmed().is_empty() {
        return Err(invalid("completion.placeholder must not be blank"));
    }
    if completion.separator.is_empty() {
        return Err(invalid("completion.separator must not be empty"));
    }
    if completion.max_depth == 0 {
        return Err(invalid("completion.maxDepth must be at least 1"));
    }

    tracing::debug!("Config validation passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_yaml() {
        let yaml = r#"
mappers: "src/main/resources/**/*.xml"
types: "build/type-model.json"
completion:
  paramAnnotation: "com.example.Named"
"#;

        let mut file = NamedTempFile::with_suffix(".yml").unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file.flush().unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.completion.param_annotation, "com.example.Named");
        assert_eq!(config.completion.param_prefix, "#{");
        assert!(config.types.is_some());
    }

    #[test]
    fn test_load_json() {
        let json = r#"{ "mappers": ["a/*.xml", "b/*.xml"] }"#;

        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.mappers.patterns().len(), 2);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = load_config_from_str("", Path::new(".mapperrc.yml")).unwrap();
        assert_eq!(config, MapperConfig::default());
    }

    #[test]
    fn test_mapperrc_without_extension_falls_back_to_json() {
        let config =
            load_config_from_str(r#"{"completion": {"maxDepth": 3}}"#, Path::new(".mapperrc"))
                .unwrap();
        assert_eq!(config.completion.max_depth, 3);
    }

    #[test]
    fn test_unsupported_format() {
        let result = load_config_from_str("x = 1", Path::new("mapper.toml"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validation_rejects_blank_placeholder() {
        let yaml = "completion:\n  placeholder: \"  \"\n";
        let result = load_config_from_str(yaml, Path::new(".mapperrc.yml"));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let yaml = "completion:\n  maxDepth: 0\n";
        let result = load_config_from_str(yaml, Path::new(".mapperrc.yml"));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validation_rejects_empty_mapper_pattern() {
        let result = load_config_from_str("mappers: \"\"\n", Path::new(".mapperrc.yml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".mapperrc.yml");
        fs::write(&config_path, "mappers: \"**/*.xml\"").unwrap();

        let sub_dir = temp_dir.path().join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let found = find_config(&sub_dir).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_config_file_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".mapperrc.yml"), "").unwrap();
        fs::write(temp_dir.path().join("mapper.config.json"), "{}").unwrap();

        let found = find_config(temp_dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), ".mapperrc.yml");
    }
}
