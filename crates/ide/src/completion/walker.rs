//! Recursive resolution of path segments through binding tables.

use super::bindings::BindingTable;
use mapper_hir::{TypeIntrospector, TypeRef};

/// A binding that matched the final path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: String,
    pub ty: TypeRef,
    /// Index of the segment the candidate completes; 0 for parameters
    pub depth: usize,
}

/// Walks a segment sequence through the tables derived from `introspector`.
///
/// There is no visited-type guard: every level consumes one segment, so a
/// self-referential type (`node.parent.parent`) is bounded by the typed path
/// and by `max_depth`.
pub struct PathWalker<'a, I: ?Sized> {
    introspector: &'a I,
    max_depth: usize,
}

impl<'a, I> PathWalker<'a, I>
where
    I: TypeIntrospector + ?Sized,
{
    pub fn new(introspector: &'a I, max_depth: usize) -> Self {
        Self {
            introspector,
            max_depth,
        }
    }

    /// Candidates for the final segment, in table order at every depth.
    ///
    /// Duplicate labels reached through different branches are kept.
    #[must_use]
    pub fn walk(&self, segments: &[String], table: &BindingTable) -> Vec<Candidate> {
        self.walk_at(segments, 0, table)
    }

    fn walk_at(&self, segments: &[String], depth: usize, table: &BindingTable) -> Vec<Candidate> {
        let Some(target) = segments.get(depth).map(String::as_str) else {
            return Vec::new();
        };
        if depth >= self.max_depth {
            tracing::debug!(depth, max_depth = self.max_depth, "Path exceeds maximum depth");
            return Vec::new();
        }
        let is_final = depth + 1 == segments.len();

        let mut candidates = Vec::new();
        for (name, ty) in table.iter() {
            if is_final && name.starts_with(target) {
                candidates.push(Candidate {
                    label: name.to_string(),
                    ty: ty.clone(),
                    depth,
                });
            } else if !is_final && name == target {
                if !self.introspector.is_structured(ty) {
                    tracing::trace!(name, %ty, "Leaf type, branch ends");
                    continue;
                }
                let members = BindingTable::from_members(self.introspector, ty);
                candidates.extend(self.walk_at(segments, depth + 1, &members));
            }
        }
        candidates
    }
}
