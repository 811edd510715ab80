//! File-related types: [`FileId`], [`FileUri`], [`Language`].

use std::path::Path;
use std::sync::Arc;

/// Input file identifier in the project.
///
/// `FileId`s are assigned when files are added to the analysis host and stay
/// stable across content changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u32);

impl FileId {
    /// Create a new `FileId` from a raw u32 value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value of this `FileId`.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// A URI string identifying a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileUri(Arc<str>);

impl FileUri {
    /// Create a new `FileUri` from a string.
    #[must_use]
    pub fn new(uri: impl Into<Arc<str>>) -> Self {
        Self(uri.into())
    }

    /// Create a `FileUri` from a filesystem path.
    ///
    /// Strings that already carry a scheme are passed through unchanged.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let path_str = path.to_string_lossy();
        if path_str.contains("://") {
            return Self::new(path_str.as_ref());
        }
        if path_str.starts_with('/') {
            return Self::new(format!("file://{path_str}"));
        }
        Self::new(format!("file:///{path_str}"))
    }

    /// Get the URI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The filesystem path portion of a `file://` URI, or the raw string.
    #[must_use]
    pub fn path_str(&self) -> &str {
        self.0.strip_prefix("file://").unwrap_or(&self.0)
    }
}

impl std::fmt::Display for FileUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Language of the text surrounding a caret.
///
/// Only mapper XML participates in parameter completion. SQL fragments are
/// recognised (the editor can inject a SQL dialect into statement bodies) but
/// have no statement context of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Mapper XML files (.xml)
    Xml,
    /// Standalone or injected SQL (.sql)
    Sql,
    /// Anything else
    Other,
}

impl Language {
    /// Detect language from a file path based on its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("xml") => Self::Xml,
            Some("sql") => Self::Sql,
            _ => Self::Other,
        }
    }

    /// Detect language from a URI string.
    #[must_use]
    pub fn from_uri(uri: &FileUri) -> Self {
        Self::from_path(Path::new(uri.path_str()))
    }

    /// Whether parameter-path completion can run in this language.
    #[must_use]
    pub const fn supports_parameter_completion(self) -> bool {
        matches!(self, Self::Xml)
    }
}
