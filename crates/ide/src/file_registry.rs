//! File registry for mapping between file URIs and parsed mapper documents.
//!
//! Files keep the [`FileId`] they were first registered with across content
//! updates. Iteration follows registration order, which is the enumeration
//! order cross-file lookups break ties with.

use indexmap::IndexMap;
use mapper_syntax::{parse_mapper, LineIndex, MapperDocument};
use mapper_types::{FileId, FileUri, Language};
use std::sync::Arc;

/// A registered file.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub id: FileId,
    pub uri: FileUri,
    pub language: Language,
    pub text: Arc<str>,
    pub line_index: Arc<LineIndex>,
    /// `None` for non-XML files and XML that failed to parse
    pub document: Option<Arc<MapperDocument>>,
}

/// Maps file URIs to their content and parse results.
#[derive(Debug, Clone, Default)]
pub struct FileRegistry {
    next_id: u32,
    files: IndexMap<FileUri, FileEntry>,
}

impl FileRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update a file.
    ///
    /// Returns the file ID and whether the file is new.
    pub fn add_file(&mut self, uri: FileUri, text: &str) -> (FileId, bool) {
        let language = Language::from_uri(&uri);
        let text: Arc<str> = Arc::from(text);
        let document = (language == Language::Xml)
            .then(|| match parse_mapper(uri.clone(), Arc::clone(&text)) {
                Ok(document) => Some(Arc::new(document)),
                Err(e) => {
                    tracing::warn!(uri = %uri, error = %e, "Failed to parse mapper file");
                    None
                }
            })
            .flatten();

        let (id, is_new) = match self.files.get(&uri) {
            Some(existing) => (existing.id, false),
            None => {
                let id = FileId::new(self.next_id);
                self.next_id += 1;
                (id, true)
            }
        };

        let entry = FileEntry {
            id,
            uri: uri.clone(),
            language,
            line_index: Arc::new(LineIndex::new(&text)),
            text,
            document,
        };
        self.files.insert(uri, entry);
        (id, is_new)
    }

    /// Remove a file. Returns `false` if it was not registered.
    pub fn remove_file(&mut self, uri: &FileUri) -> bool {
        self.files.shift_remove(uri).is_some()
    }

    #[must_use]
    pub fn get(&self, uri: &FileUri) -> Option<&FileEntry> {
        self.files.get(uri)
    }

    #[must_use]
    pub fn get_file_id(&self, uri: &FileUri) -> Option<FileId> {
        self.files.get(uri).map(|entry| entry.id)
    }

    #[must_use]
    pub fn get_uri(&self, id: FileId) -> Option<&FileUri> {
        self.files
            .values()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.uri)
    }

    #[must_use]
    pub fn contains(&self, uri: &FileUri) -> bool {
        self.files.contains_key(uri)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.files.values()
    }

    pub fn uris(&self) -> impl Iterator<Item = &FileUri> {
        self.files.keys()
    }

    /// Parsed documents whose root element is `<mapper>`, in registration order.
    pub fn mapper_documents(&self) -> impl Iterator<Item = &MapperDocument> {
        self.files
            .values()
            .filter_map(|entry| entry.document.as_deref())
            .filter(|document| document.is_mapper())
    }
}
