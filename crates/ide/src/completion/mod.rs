//! Completion feature implementation.
//!
//! Completes dotted parameter paths (`#{user.address.ci`) inside mapper
//! statements:
//! - [`tokenize`] turns the text before the caret into path segments
//! - [`BindingTable`] holds the names visible at one depth
//! - [`PathWalker`] follows the segments through the type model
//! - the emitter packages the matches for the host

mod bindings;
mod emitter;
mod tokenizer;
mod walker;

pub use bindings::BindingTable;
pub use tokenizer::{tokenize, TokenizedPath};
pub use walker::{Candidate, PathWalker};

use crate::context::StatementContextProvider;
use crate::types::CompletionList;
use crate::Analysis;
use mapper_config::CompletionConfig;
use mapper_hir::{DeclaredParameter, TypeIntrospector};
use mapper_types::{FileUri, Position};

/// Complete a parameter path.
///
/// `raw_text` is the text before the caret with the placeholder marker
/// appended. Every failure mode (no bindable parameters, nothing path-like
/// before the caret, unmatched segments) yields an empty list.
pub fn complete_path<I>(
    raw_text: &str,
    parameters: &[DeclaredParameter],
    introspector: &I,
    config: &CompletionConfig,
) -> CompletionList
where
    I: TypeIntrospector + ?Sized,
{
    let table = BindingTable::from_parameters(parameters);
    if table.is_empty() {
        tracing::debug!("No bindable parameters");
        return CompletionList::default();
    }

    let Some(path) = tokenize(raw_text, config) else {
        return CompletionList::default();
    };

    let walker = PathWalker::new(introspector, config.max_depth);
    let candidates = walker.walk(&path.segments, &table);
    tracing::debug!(
        segments = path.segments.len(),
        candidates = candidates.len(),
        "Walked parameter path"
    );
    emitter::emit(candidates, &path)
}

/// Get completions at a position.
///
/// Returns `None` for files the analysis does not know about.
pub(crate) fn completions(
    analysis: &Analysis,
    file: &FileUri,
    position: Position,
) -> Option<CompletionList> {
    analysis.registry.get(file)?;

    let context = analysis.statement_context(file, position);
    if context.is_empty() {
        return Some(CompletionList::default());
    }

    let completion = &analysis.config.completion;
    let raw_text = format!("{}{}", context.caret_fragment, completion.placeholder);
    Some(complete_path(
        &raw_text,
        &context.parameters,
        analysis.model.as_ref(),
        completion,
    ))
}
