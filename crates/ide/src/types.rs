//! POD types for IDE features.
//!
//! Plain structs with public fields that form the interface between the
//! analysis layer and whatever presents the results (CLI, editor plugin).

use mapper_types::{DiagnosticSeverity, FileUri, OffsetRange, Range};

/// Completion item kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    /// A statement parameter (first path segment)
    Parameter,
    /// A field or accessor property of a parameter's type
    Property,
}

impl std::fmt::Display for CompletionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parameter => write!(f, "parameter"),
            Self::Property => write!(f, "property"),
        }
    }
}

/// Completion item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    /// Binding name, inserted as-is
    pub label: String,
    pub kind: CompletionKind,
    /// Type of the binding
    pub detail: Option<String>,
}

impl CompletionItem {
    pub fn new(label: impl Into<String>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Result of a completion request.
///
/// `prefix_filter` tells the host which already-typed text the items
/// should be matched against:
/// - `Some("")`: show every item unfiltered
/// - `Some(prefix)`: narrow by the partially typed final segment
/// - `None`: use the host's own default matcher
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionList {
    pub prefix_filter: Option<String>,
    pub items: Vec<CompletionItem>,
}

impl CompletionList {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.label.as_str())
    }

    /// Items that pass the prefix filter.
    pub fn visible(&self) -> impl Iterator<Item = &CompletionItem> {
        let prefix = self.prefix_filter.as_deref().unwrap_or_default();
        self.items
            .iter()
            .filter(move |item| item.label.starts_with(prefix))
    }
}

/// Location in a specific file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: FileUri,
    pub range: Range,
}

impl Location {
    #[must_use]
    pub const fn new(file: FileUri, range: Range) -> Self {
        Self { file, range }
    }
}

/// A reference from a span in one file to an element in (possibly) another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Span of the referring text (an attribute value)
    pub source: OffsetRange,
    pub target_file: FileUri,
    /// Span of the referenced element
    pub target: OffsetRange,
}

/// Diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub message: String,
    /// Stable identifier of the check that produced it
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn new(range: Range, severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            range,
            severity,
            message: message.into(),
            code: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}
