//! Statement context at a caret: which statement encloses it and which
//! parameters its mapper method declares.

use mapper_config::CompletionConfig;
use mapper_hir::{DeclaredParameter, TypeModel};
use mapper_syntax::MapperDocument;
use mapper_types::{FileUri, Language, Position};

/// What the completion core needs to know about the caret's surroundings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementContext {
    pub language: Language,
    /// `id` of the enclosing statement, if any
    pub statement_id: Option<String>,
    /// Token-like text immediately before the caret
    pub caret_fragment: String,
    /// Declared parameters of the statement's mapper method
    pub parameters: Vec<DeclaredParameter>,
}

impl StatementContext {
    #[must_use]
    pub fn empty(language: Language) -> Self {
        Self {
            language,
            statement_id: None,
            caret_fragment: String::new(),
            parameters: Vec::new(),
        }
    }

    /// `true` when nothing can be completed from this context.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.language.supports_parameter_completion() || self.parameters.is_empty()
    }
}

/// Source of [`StatementContext`]s for editor positions.
///
/// Implemented by [`crate::Analysis`]; completion tests can supply fakes.
pub trait StatementContextProvider {
    /// Context at `position` in `file`. Unknown files, unsupported languages
    /// and positions outside a statement give an empty context.
    fn statement_context(&self, file: &FileUri, position: Position) -> StatementContext;
}

/// Statement context at `offset` in a parsed mapper document.
///
/// The innermost element with an `id` must be a statement; its `id` and the
/// document's `namespace` name a method in the type model.
#[must_use]
pub fn statement_context(
    document: &MapperDocument,
    offset: usize,
    model: &TypeModel,
    config: &CompletionConfig,
) -> StatementContext {
    let mut context = StatementContext::empty(Language::Xml);
    if let Some(fragment) = document.caret_fragment(offset) {
        context.caret_fragment = fragment.to_string();
    }

    let Some(statement) = document.enclosing_statement(offset) else {
        tracing::trace!(offset, "Caret is not inside a statement");
        return context;
    };
    context.statement_id = Some(statement.id.clone());

    let Some(namespace) = document.namespace.as_deref() else {
        tracing::trace!(uri = %document.uri, "Mapper has no namespace");
        return context;
    };
    let Some(method) = model.mapper_method(namespace, &statement.id) else {
        tracing::debug!(namespace, statement = %statement.id, "No mapper method for statement");
        return context;
    };

    context.parameters = model.declared_parameters(method, &config.param_annotation);
    context
}
