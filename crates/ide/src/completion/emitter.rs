use super::tokenizer::TokenizedPath;
use super::walker::Candidate;
use crate::types::{CompletionItem, CompletionKind, CompletionList};

/// Package walker candidates for the host UI.
///
/// An empty target disables filtering; with `expects_prefix` the host
/// narrows by the target; otherwise its default matcher applies.
pub(crate) fn emit(candidates: Vec<Candidate>, path: &TokenizedPath) -> CompletionList {
    let target = path.target();
    let prefix_filter = if target.is_empty() {
        Some(String::new())
    } else if path.expects_prefix {
        Some(target.to_string())
    } else {
        None
    };

    let items = candidates
        .into_iter()
        .map(|candidate| {
            let kind = if candidate.depth == 0 {
                CompletionKind::Parameter
            } else {
                CompletionKind::Property
            };
            CompletionItem::new(candidate.label, kind).with_detail(candidate.ty.name())
        })
        .collect();

    CompletionList {
        prefix_filter,
        items,
    }
}
