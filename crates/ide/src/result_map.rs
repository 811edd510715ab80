//! `resultMap` references: resolution, navigation and validation.
//!
//! A `resultMap="..."` attribute names a `<resultMap id="...">` defined in the
//! same file or in another mapper file sharing the same namespace.

use crate::types::{Diagnostic, Location, Reference};
use crate::Analysis;
use mapper_syntax::{AttributeValue, LineIndex, MapperDocument, ResultMapDef};
use mapper_types::{DiagnosticSeverity, FileUri, OffsetRange, Position, Range};

/// Diagnostic code for references to undefined result maps.
pub const UNRESOLVED_RESULT_MAP: &str = "unresolved-result-map";

/// A resolved `<resultMap>` and the document defining it.
#[derive(Debug, Clone, Copy)]
pub struct ResultMapTarget<'a> {
    pub document: &'a MapperDocument,
    pub def: &'a ResultMapDef,
}

impl ResultMapTarget<'_> {
    #[must_use]
    pub fn uri(&self) -> &FileUri {
        &self.document.uri
    }
}

/// Resolve a result map id as seen from `current`.
///
/// The current document is searched first. Otherwise the first result map
/// with that id in another `<mapper>` document with the same namespace wins,
/// in `project` order. Documents without a namespace share the absent one.
pub fn resolve_result_map<'a, P>(
    id: &str,
    current: &'a MapperDocument,
    project: P,
) -> Option<ResultMapTarget<'a>>
where
    P: IntoIterator<Item = &'a MapperDocument>,
{
    if !current.is_mapper() {
        return None;
    }
    if let Some(def) = current.result_map(id) {
        return Some(ResultMapTarget {
            document: current,
            def,
        });
    }

    project
        .into_iter()
        .filter(|document| {
            document.uri != current.uri
                && document.is_mapper()
                && document.namespace == current.namespace
        })
        .find_map(|document| {
            document
                .result_map(id)
                .map(|def| ResultMapTarget { document, def })
        })
}

/// The id a reference to `target` is written as.
#[must_use]
pub fn result_map_id<'a>(target: &ResultMapTarget<'a>) -> Option<&'a str> {
    Some(target.def.id.as_str()).filter(|id| !id.is_empty())
}

/// References from a `resultMap` attribute value to its target element.
#[must_use]
pub fn result_map_references(value: &AttributeValue, target: &ResultMapTarget<'_>) -> Vec<Reference> {
    vec![Reference {
        source: value.range,
        target_file: target.uri().clone(),
        target: target.def.range,
    }]
}

fn to_range(line_index: &LineIndex, range: OffsetRange) -> Range {
    Range::new(
        line_index.position(range.start),
        line_index.position(range.end),
    )
}

/// Resolve a result map id from `file` to the location of its `id` value.
pub(crate) fn resolve_location(analysis: &Analysis, file: &FileUri, id: &str) -> Option<Location> {
    let entry = analysis.registry.get(file)?;
    let document = entry.document.as_deref()?;
    let target = resolve_result_map(id, document, analysis.registry.mapper_documents())?;
    let target_entry = analysis.registry.get(target.uri())?;
    Some(Location::new(
        target.uri().clone(),
        to_range(&target_entry.line_index, target.def.id_range),
    ))
}

/// Go to the result map named by the `resultMap` attribute under the caret.
pub(crate) fn goto_definition(
    analysis: &Analysis,
    file: &FileUri,
    position: Position,
) -> Option<Vec<Location>> {
    let entry = analysis.registry.get(file)?;
    let document = entry.document.as_deref()?;
    let offset = entry.line_index.offset(position)?;
    let value = document.result_map_reference_at(offset)?;

    resolve_location(analysis, file, &value.value).map(|location| vec![location])
}

/// Warnings for `resultMap` attributes that resolve nowhere.
pub(crate) fn unresolved_result_maps(analysis: &Analysis, file: &FileUri) -> Vec<Diagnostic> {
    let Some(entry) = analysis.registry.get(file) else {
        return Vec::new();
    };
    let Some(document) = entry.document.as_deref() else {
        return Vec::new();
    };
    if !document.is_mapper() {
        return Vec::new();
    }

    document
        .statements
        .iter()
        .filter_map(|statement| statement.result_map.as_ref())
        .filter(|value| {
            resolve_result_map(&value.value, document, analysis.registry.mapper_documents())
                .is_none()
        })
        .map(|value| {
            Diagnostic::new(
                to_range(&entry.line_index, value.range),
                DiagnosticSeverity::Warning,
                format!("Result map '{}' is not defined", value.value),
            )
            .with_code(UNRESOLVED_RESULT_MAP)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapper_syntax::parse_mapper;

    fn doc(uri: &str, text: &str) -> MapperDocument {
        parse_mapper(FileUri::new(uri), text).unwrap()
    }

    const MAIN: &str = r#"<mapper namespace="a.UserMapper">
  <resultMap id="local" type="a.User"/>
  <select id="find" resultMap="shared">SELECT 1</select>
</mapper>"#;

    const SHARED: &str = r#"<mapper namespace="a.UserMapper">
  <resultMap id="shared" type="a.User"/>
  <resultMap id="local" type="a.Other"/>
</mapper>"#;

    const OTHER_NAMESPACE: &str = r#"<mapper namespace="b.OrderMapper">
  <resultMap id="orders" type="b.Order"/>
</mapper>"#;

    #[test]
    fn test_current_document_first() {
        let main = doc("file:///main.xml", MAIN);
        let shared = doc("file:///shared.xml", SHARED);
        let target = resolve_result_map("local", &main, [&shared]).unwrap();
        assert_eq!(target.uri().as_str(), "file:///main.xml");
        assert_eq!(target.def.type_name.as_deref(), Some("a.User"));
    }

    #[test]
    fn test_same_namespace_in_other_document() {
        let main = doc("file:///main.xml", MAIN);
        let shared = doc("file:///shared.xml", SHARED);
        let target = resolve_result_map("shared", &main, [&main, &shared]).unwrap();
        assert_eq!(target.uri().as_str(), "file:///shared.xml");
        assert_eq!(result_map_id(&target), Some("shared"));
    }

    #[test]
    fn test_other_namespace_is_not_searched() {
        let main = doc("file:///main.xml", MAIN);
        let other = doc("file:///orders.xml", OTHER_NAMESPACE);
        assert!(resolve_result_map("orders", &main, [&other]).is_none());
    }

    #[test]
    fn test_first_match_in_project_order() {
        let main = doc("file:///main.xml", MAIN);
        let first = doc("file:///1.xml", SHARED);
        let second = doc("file:///2.xml", SHARED);
        let target = resolve_result_map("shared", &main, [&first, &second]).unwrap();
        assert_eq!(target.uri().as_str(), "file:///1.xml");
    }

    #[test]
    fn test_absent_namespaces_match() {
        let main = doc("file:///main.xml", "<mapper><select id=\"x\"/></mapper>");
        let other = doc("file:///other.xml", "<mapper><resultMap id=\"m\"/></mapper>");
        assert!(resolve_result_map("m", &main, [&other]).is_some());
    }

    #[test]
    fn test_non_mapper_documents_are_ignored() {
        let main = doc("file:///main.xml", MAIN);
        let not_mapper = doc(
            "file:///config.xml",
            r#"<configuration namespace="a.UserMapper"><resultMap id="shared"/></configuration>"#,
        );
        assert!(resolve_result_map("shared", &main, [&not_mapper]).is_none());
        assert!(resolve_result_map("shared", &not_mapper, [&main]).is_none());
    }

    #[test]
    fn test_missing_id_is_none() {
        let main = doc("file:///main.xml", MAIN);
        assert!(resolve_result_map("missing", &main, std::iter::empty()).is_none());
        assert!(resolve_result_map("", &main, std::iter::empty()).is_none());
    }

    #[test]
    fn test_references_point_at_element() {
        let main = doc("file:///main.xml", MAIN);
        let shared = doc("file:///shared.xml", SHARED);
        let value = main.statements[0].result_map.clone().unwrap();
        let target = resolve_result_map(&value.value, &main, [&shared]).unwrap();
        let references = result_map_references(&value, &target);
        assert_eq!(references.len(), 1);
        assert_eq!(&MAIN[value.range.start..value.range.end], "shared");
        let element = references[0].target;
        assert!(SHARED[element.start..element.end].starts_with("<resultMap id=\"shared\""));
    }
}
