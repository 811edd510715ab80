//! IDE features for `MyBatis` mapper files.
//!
//! This crate is the API boundary between editor-facing tools (the CLI, an
//! editor plugin) and the analysis layers. It owns the loaded mapper files and
//! type model and answers position-based queries against them.
//!
//! # Architecture
//!
//! ```text
//! cli / editor plugin
//!       ↓
//! mapper-ide (this crate)  AnalysisHost, Analysis
//!       ↓
//! mapper-hir               type model, introspection
//! mapper-syntax            mapper XML parsing
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! host.set_type_model(model);
//! host.add_file(uri.clone(), text);
//!
//! let analysis = host.snapshot();
//! let completions = analysis.completions(&uri, position);
//! ```

mod completion;
mod context;
mod file_registry;
mod result_map;
mod sql_format;
mod types;

pub use completion::{
    complete_path, tokenize, BindingTable, Candidate, PathWalker, TokenizedPath,
};
pub use context::{statement_context, StatementContext, StatementContextProvider};
pub use file_registry::{FileEntry, FileRegistry};
pub use result_map::{
    resolve_result_map, result_map_id, result_map_references, ResultMapTarget,
    UNRESOLVED_RESULT_MAP,
};
pub use sql_format::{
    format_sql, parse_parameter, parse_parameters, split_parameters_line, SqlLiteral,
};
pub use types::{
    CompletionItem, CompletionKind, CompletionList, Diagnostic, Location, Reference,
};

use anyhow::Context as _;
use mapper_config::MapperConfig;
use mapper_hir::TypeModel;
use mapper_types::{FileId, FileUri, Language, Position};
use std::path::Path;
use std::sync::Arc;

/// What [`AnalysisHost::load`] found on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub mapper_files: usize,
    /// Mapper files that could not be read
    pub skipped_files: usize,
    pub type_files: usize,
    pub classes: usize,
}

/// The main entry point for IDE features.
///
/// Owns the configuration, the type model and the registered files. Mutation
/// happens here; queries go through an [`Analysis`] snapshot. Snapshots share
/// state with the host until it is next mutated, at which point the host
/// copies what it changes, so snapshots never observe a half-applied update.
#[derive(Debug, Clone, Default)]
pub struct AnalysisHost {
    config: Arc<MapperConfig>,
    model: Arc<TypeModel>,
    registry: Arc<FileRegistry>,
}

impl AnalysisHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            config: Arc::new(config),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: MapperConfig) {
        self.config = Arc::new(config);
    }

    /// Replace the type model.
    pub fn set_type_model(&mut self, model: TypeModel) {
        tracing::debug!(classes = model.len(), "Type model set");
        self.model = Arc::new(model);
    }

    /// Add or update a file.
    ///
    /// XML files are parsed immediately; parse failures are logged and leave
    /// the file registered without a document.
    pub fn add_file(&mut self, uri: FileUri, text: &str) -> FileId {
        let (id, is_new) = Arc::make_mut(&mut self.registry).add_file(uri, text);
        tracing::trace!(file_id = id.as_u32(), is_new, "File registered");
        id
    }

    /// Remove a file. Returns `false` if it was not registered.
    pub fn remove_file(&mut self, uri: &FileUri) -> bool {
        Arc::make_mut(&mut self.registry).remove_file(uri)
    }

    #[must_use]
    pub fn contains_file(&self, uri: &FileUri) -> bool {
        self.registry.contains(uri)
    }

    /// All registered files, in registration order.
    #[must_use]
    pub fn files(&self) -> Vec<FileUri> {
        self.registry.uris().cloned().collect()
    }

    /// Load mapper files and type model files named by `config`.
    ///
    /// Patterns are resolved against `base_dir`. Unreadable mapper files are
    /// logged and skipped; an unreadable or malformed type model is an error.
    #[tracing::instrument(skip(self, config), fields(base = %base_dir.display()))]
    pub fn load(&mut self, config: MapperConfig, base_dir: &Path) -> anyhow::Result<LoadSummary> {
        let mut summary = LoadSummary::default();

        let type_files = config
            .type_files(base_dir)
            .context("Failed to expand type model patterns")?;
        let model = TypeModel::load(&type_files).context("Failed to load type model")?;
        summary.type_files = type_files.len();
        summary.classes = model.len();

        let mapper_files = config
            .mapper_files(base_dir)
            .context("Failed to expand mapper patterns")?;
        let registry = Arc::make_mut(&mut self.registry);
        for path in &mapper_files {
            match std::fs::read_to_string(path) {
                Ok(text) => {
                    registry.add_file(FileUri::from_path(path), &text);
                    summary.mapper_files += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read mapper file");
                    summary.skipped_files += 1;
                }
            }
        }

        self.model = Arc::new(model);
        self.config = Arc::new(config);
        tracing::info!(
            mapper_files = summary.mapper_files,
            skipped = summary.skipped_files,
            classes = summary.classes,
            "Project loaded"
        );
        Ok(summary)
    }

    /// Get an immutable snapshot for analysis.
    #[must_use]
    pub fn snapshot(&self) -> Analysis {
        Analysis {
            config: Arc::clone(&self.config),
            model: Arc::clone(&self.model),
            registry: Arc::clone(&self.registry),
        }
    }
}

/// Immutable snapshot of the analysis state.
///
/// Cheap to clone and safe to share across threads. All IDE feature queries
/// go through this.
#[derive(Debug, Clone)]
pub struct Analysis {
    config: Arc<MapperConfig>,
    model: Arc<TypeModel>,
    registry: Arc<FileRegistry>,
}

impl Analysis {
    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    #[must_use]
    pub fn type_model(&self) -> &TypeModel {
        &self.model
    }

    #[must_use]
    pub fn files(&self) -> Vec<FileUri> {
        self.registry.uris().cloned().collect()
    }

    #[must_use]
    pub fn file_content(&self, file: &FileUri) -> Option<Arc<str>> {
        self.registry.get(file).map(|entry| Arc::clone(&entry.text))
    }

    /// Get completions at a position.
    ///
    /// Returns `None` for unknown files; positions where nothing can be
    /// completed give an empty list.
    #[must_use]
    pub fn completions(&self, file: &FileUri, position: Position) -> Option<CompletionList> {
        completion::completions(self, file, position)
    }

    /// Go to the `<resultMap>` named by the `resultMap` attribute at a position.
    #[must_use]
    pub fn goto_definition(&self, file: &FileUri, position: Position) -> Option<Vec<Location>> {
        result_map::goto_definition(self, file, position)
    }

    /// Resolve a result map id as seen from `file`.
    #[must_use]
    pub fn resolve_result_map(&self, file: &FileUri, id: &str) -> Option<Location> {
        result_map::resolve_location(self, file, id)
    }

    /// Diagnostics for a file.
    #[must_use]
    pub fn diagnostics(&self, file: &FileUri) -> Vec<Diagnostic> {
        result_map::unresolved_result_maps(self, file)
    }

    /// Diagnostics for every registered file that has any, in registration
    /// order.
    #[must_use]
    pub fn all_diagnostics(&self) -> Vec<(FileUri, Vec<Diagnostic>)> {
        self.registry
            .uris()
            .filter_map(|uri| {
                let diagnostics = self.diagnostics(uri);
                (!diagnostics.is_empty()).then(|| (uri.clone(), diagnostics))
            })
            .collect()
    }
}

impl StatementContextProvider for Analysis {
    fn statement_context(&self, file: &FileUri, position: Position) -> StatementContext {
        let language = Language::from_uri(file);
        if !language.supports_parameter_completion() {
            return StatementContext::empty(language);
        }
        let Some(entry) = self.registry.get(file) else {
            return StatementContext::empty(language);
        };
        let (Some(document), Some(offset)) =
            (entry.document.as_deref(), entry.line_index.offset(position))
        else {
            return StatementContext::empty(language);
        };
        statement_context(document, offset, &self.model, &self.config.completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapper_test_utils::{user_model, USER_MAPPER_XML};

    #[test]
    fn test_snapshot_is_isolated_from_later_updates() {
        let mut host = AnalysisHost::new();
        let uri = FileUri::new("file:///UserMapper.xml");
        host.add_file(uri.clone(), USER_MAPPER_XML);
        let before = host.snapshot();

        host.remove_file(&uri);
        assert!(before.file_content(&uri).is_some());
        assert!(host.snapshot().file_content(&uri).is_none());
    }

    #[test]
    fn test_statement_context_for_sql_file_is_empty() {
        let mut host = AnalysisHost::new();
        host.set_type_model(user_model());
        let uri = FileUri::new("file:///query.sql");
        host.add_file(uri.clone(), "SELECT #{user.name}");
        let context = host.snapshot().statement_context(&uri, Position::new(0, 15));
        assert_eq!(context.language, Language::Sql);
        assert!(context.is_empty());
    }

    #[test]
    fn test_unknown_file_has_no_completions() {
        let analysis = AnalysisHost::new().snapshot();
        assert!(analysis
            .completions(&FileUri::new("file:///missing.xml"), Position::new(0, 0))
            .is_none());
    }
}
