//! Normalisation of caret-adjacent text into dotted path segments.

use mapper_config::CompletionConfig;

/// A dotted parameter path split at the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedPath {
    /// Trimmed segments; the last one is the partially typed name and may be
    /// empty (just-typed separator).
    pub segments: Vec<String>,
    /// Whether the host should narrow candidates by the final segment.
    pub expects_prefix: bool,
}

impl TokenizedPath {
    /// The segment being completed.
    #[must_use]
    pub fn target(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }
}

/// Tokenize the text immediately preceding the caret.
///
/// The text may end with the editor's placeholder marker and may start with
/// a parameter opener. Returns `None` when nothing path-like remains.
#[must_use]
pub fn tokenize(raw: &str, config: &CompletionConfig) -> Option<TokenizedPath> {
    let mut text = raw;
    let mut expects_prefix = false;

    let trimmed_placeholder = config.placeholder_trimmed();
    if let Some(rest) = strip_suffix_nonempty(text, trimmed_placeholder) {
        text = rest;
    } else if let Some(rest) = strip_suffix_nonempty(text, &config.placeholder) {
        text = rest;
        expects_prefix = true;
    }

    if let Some(rest) = strip_suffix_nonempty(text, &config.param_suffix) {
        text = rest;
        expects_prefix = true;
    }

    if let Some(rest) = strip_prefix_nonempty(text, &config.param_prefix) {
        text = rest;
    } else if let Some(rest) = strip_prefix_nonempty(text, &config.prepared_param_prefix) {
        text = rest;
    }

    // Keep only the final token-like fragment; the whitespace itself stays and
    // is trimmed away with the segments.
    if let Some((index, _)) = text.char_indices().rev().find(|(_, c)| c.is_whitespace()) {
        text = &text[index..];
    }

    let mut owned = text.to_string();
    if owned.ends_with(config.separator.as_str()) {
        owned.push(' ');
    }

    let segments: Vec<String> = owned
        .split(config.separator.as_str())
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.trim().to_string())
        .collect();

    tracing::trace!(raw, ?segments, expects_prefix, "Tokenized parameter path");

    if segments.is_empty() {
        return None;
    }
    Some(TokenizedPath {
        segments,
        expects_prefix,
    })
}

fn strip_suffix_nonempty<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    if suffix.is_empty() {
        return None;
    }
    text.strip_suffix(suffix)
}

fn strip_prefix_nonempty<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    text.strip_prefix(prefix)
}
