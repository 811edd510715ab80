use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level mapper-analyzer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapperConfig {
    /// Glob pattern(s) of mapper XML files, relative to the config file
    #[serde(default = "default_mappers")]
    pub mappers: PatternsConfig,

    /// Glob pattern(s) of type model files (JSON or YAML)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<PatternsConfig>,

    /// Parameter completion settings
    #[serde(default)]
    pub completion: CompletionConfig,
}

fn default_mappers() -> PatternsConfig {
    PatternsConfig::Pattern("**/*.xml".to_string())
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            mappers: default_mappers(),
            types: None,
            completion: CompletionConfig::default(),
        }
    }
}

impl MapperConfig {
    /// Expand the mapper patterns against `base_dir`.
    pub fn mapper_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>> {
        expand_patterns(&self.mappers, base_dir)
    }

    /// Expand the type model patterns against `base_dir`.
    ///
    /// A config without `types` yields no files.
    pub fn type_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>> {
        self.types
            .as_ref()
            .map_or_else(|| Ok(Vec::new()), |types| expand_patterns(types, base_dir))
    }
}

/// Expand glob patterns relative to `base_dir`, deduplicated, in pattern order.
#[tracing::instrument(skip(patterns), fields(base = %base_dir.display()))]
fn expand_patterns(patterns: &PatternsConfig, base_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns.patterns() {
        let full_pattern = if Path::new(pattern).is_absolute() {
            pattern.to_string()
        } else {
            base_dir.join(pattern).to_string_lossy().into_owned()
        };

        let paths = glob::glob(&full_pattern).map_err(|e| ConfigError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => {
                    if !files.contains(&path) {
                        files.push(path);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Skipping unreadable glob entry"),
            }
        }
    }

    tracing::debug!(count = files.len(), "Expanded patterns");
    Ok(files)
}

/// One or many glob patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternsConfig {
    /// Single pattern
    Pattern(String),
    /// Multiple patterns
    Patterns(Vec<String>),
}

impl PatternsConfig {
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            Self::Pattern(pattern) => vec![pattern.as_str()],
            Self::Patterns(patterns) => patterns.iter().map(String::as_str).collect(),
        }
    }
}

/// Markers recognised by the path tokenizer, and the parameter annotation
/// that makes a mapper method parameter bindable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionConfig {
    /// Placeholder the editor inserts at the caret (untrimmed form)
    pub placeholder: String,
    /// Opener of an ordinary bound parameter, `#{`
    pub param_prefix: String,
    /// Opener of a prepared/positional parameter, `${`
    pub prepared_param_prefix: String,
    /// Closing marker, `}`
    pub param_suffix: String,
    /// Path separator
    pub separator: String,
    /// Fully qualified name of the parameter rename annotation
    pub param_annotation: String,
    /// Maximum number of path segments the walker descends through
    pub max_depth: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            placeholder: "IntellijIdeaRulezzz ".to_string(),
            param_prefix: "#{".to_string(),
            prepared_param_prefix: "${".to_string(),
            param_suffix: "}".to_string(),
            separator: ".".to_string(),
            param_annotation: "org.apache.ibatis.annotations.Param".to_string(),
            max_depth: 32,
        }
    }
}

impl CompletionConfig {
    /// The placeholder with surrounding whitespace removed.
    #[must_use]
    pub fn placeholder_trimmed(&self) -> &str {
        self.placeholder.trim()
    }

    /// Simple (unqualified) name of the parameter annotation.
    #[must_use]
    pub fn param_annotation_simple_name(&self) -> &str {
        self.param_annotation
            .rsplit('.')
            .next()
            .unwrap_or(&self.param_annotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_completion_config() {
        let config = CompletionConfig::default();
        assert_eq!(config.placeholder_trimmed(), "IntellijIdeaRulezzz");
        assert_eq!(config.param_annotation_simple_name(), "Param");
        assert_eq!(config.separator, ".");
    }

    #[test]
    fn test_patterns_single_and_multiple() {
        let single = PatternsConfig::Pattern("a/*.xml".to_string());
        assert_eq!(single.patterns(), vec!["a/*.xml"]);

        let many = PatternsConfig::Patterns(vec!["a/*.xml".to_string(), "b/*.xml".to_string()]);
        assert_eq!(many.patterns(), vec!["a/*.xml", "b/*.xml"]);
    }

    #[test]
    fn test_deserialize_camel_case_overrides() {
        let json = r#"{
            "mappers": ["mappers/*.xml"],
            "types": "model.json",
            "completion": { "paramPrefix": "@{", "maxDepth": 4 }
        }"#;
        let config: MapperConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.completion.param_prefix, "@{");
        assert_eq!(config.completion.max_depth, 4);
        assert_eq!(config.completion.param_suffix, "}");
        assert_eq!(
            config.types,
            Some(PatternsConfig::Pattern("model.json".to_string()))
        );
    }

    #[test]
    fn test_mapper_files_expansion() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mappers = temp_dir.path().join("mappers");
        fs::create_dir(&mappers).unwrap();
        fs::write(mappers.join("UserMapper.xml"), "<mapper/>").unwrap();
        fs::write(mappers.join("notes.txt"), "").unwrap();

        let config = MapperConfig {
            mappers: PatternsConfig::Patterns(vec![
                "mappers/*.xml".to_string(),
                "mappers/User*.xml".to_string(),
            ]),
            ..MapperConfig::default()
        };

        let files = config.mapper_files(temp_dir.path()).unwrap();
        assert_eq!(files, vec![mappers.join("UserMapper.xml")]);
        assert!(config.type_files(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let config = MapperConfig {
            mappers: PatternsConfig::Pattern("[".to_string()),
            ..MapperConfig::default()
        };
        let err = config.mapper_files(Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { .. }));
    }
}
