use crate::{Result, SyntaxError};
use mapper_types::{FileUri, OffsetRange};
use std::sync::Arc;

/// Root tag of a mapper file.
pub const MAPPER_TAG: &str = "mapper";
/// Attribute naming the mapper interface a file belongs to.
pub const NAMESPACE_ATTR: &str = "namespace";

const ID_ATTR: &str = "id";
const RESULT_MAP_TAG: &str = "resultMap";
const RESULT_MAP_ATTR: &str = "resultMap";

/// The statement element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "select" => Some(Self::Select),
            "insert" => Some(Self::Insert),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// An attribute value together with the byte range of the value text
/// (quotes excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
    pub value: String,
    pub range: OffsetRange,
}

/// A `<resultMap id="...">` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMapDef {
    pub id: String,
    /// The `type` attribute, if present
    pub type_name: Option<String>,
    /// Range of the whole element
    pub range: OffsetRange,
    /// Range of the `id` attribute value
    pub id_range: OffsetRange,
}

/// A `<select|insert|update|delete id="...">` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementDef {
    pub kind: StatementKind,
    pub id: String,
    pub range: OffsetRange,
    /// The `resultMap` attribute, if present
    pub result_map: Option<AttributeValue>,
}

/// Any element carrying an `id` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdElement {
    pub tag: String,
    pub id: String,
    pub range: OffsetRange,
}

/// Owned summary of a parsed mapper file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperDocument {
    pub uri: FileUri,
    pub text: Arc<str>,
    /// Name of the root element (`mapper` for mapper files)
    pub root_tag: String,
    pub namespace: Option<String>,
    pub result_maps: Vec<ResultMapDef>,
    pub statements: Vec<StatementDef>,
    /// Every element with an `id`, in document order
    pub id_elements: Vec<IdElement>,
    /// Value ranges of every attribute, in document order
    pub attribute_values: Vec<OffsetRange>,
}

/// Parse a mapper XML file.
///
/// Files whose root is not `<mapper>` still parse; callers decide whether
/// they take part in cross-file lookups by checking [`MapperDocument::is_mapper`].
#[tracing::instrument(skip(text), fields(uri = %uri, size = tracing::field::Empty))]
pub fn parse_mapper(uri: FileUri, text: impl Into<Arc<str>>) -> Result<MapperDocument> {
    let text: Arc<str> = text.into();
    tracing::Span::current().record("size", text.len());
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let document =
        roxmltree::Document::parse_with_options(&text, options).map_err(|e| SyntaxError::Xml {
            uri: uri.to_string(),
            message: e.to_string(),
        })?;

    let root = document.root_element();
    let root_tag = root.tag_name().name().to_string();
    let namespace = root.attribute(NAMESPACE_ATTR).map(str::to_string);

    let mut result_maps = Vec::new();
    let mut statements = Vec::new();
    let mut id_elements = Vec::new();
    let mut attribute_values = Vec::new();

    for node in root.descendants().filter(roxmltree::Node::is_element) {
        let tag = node.tag_name().name();
        let range = OffsetRange::new(node.range().start, node.range().end);

        attribute_values.extend(
            node.attributes()
                .map(|attr| OffsetRange::new(attr.range_value().start, attr.range_value().end)),
        );

        let Some(id_attr) = node.attributes().find(|attr| attr.name() == ID_ATTR) else {
            continue;
        };
        let id = id_attr.value().to_string();

        id_elements.push(IdElement {
            tag: tag.to_string(),
            id: id.clone(),
            range,
        });

        if tag == RESULT_MAP_TAG {
            result_maps.push(ResultMapDef {
                id,
                type_name: node.attribute("type").map(str::to_string),
                range,
                id_range: OffsetRange::new(
                    id_attr.range_value().start,
                    id_attr.range_value().end,
                ),
            });
        } else if let Some(kind) = StatementKind::from_tag(tag) {
            let result_map = node
                .attributes()
                .find(|attr| attr.name() == RESULT_MAP_ATTR)
                .map(|attr| AttributeValue {
                    value: attr.value().to_string(),
                    range: OffsetRange::new(attr.range_value().start, attr.range_value().end),
                });
            statements.push(StatementDef {
                kind,
                id,
                range,
                result_map,
            });
        }
    }

    tracing::debug!(
        root = %root_tag,
        result_maps = result_maps.len(),
        statements = statements.len(),
        "Parsed mapper"
    );

    Ok(MapperDocument {
        uri,
        text: Arc::clone(&text),
        root_tag,
        namespace,
        result_maps,
        statements,
        id_elements,
        attribute_values,
    })
}

impl MapperDocument {
    /// Whether the root element is `<mapper>`.
    #[must_use]
    pub fn is_mapper(&self) -> bool {
        self.root_tag == MAPPER_TAG
    }

    /// Find a `resultMap` defined in this file.
    #[must_use]
    pub fn result_map(&self, id: &str) -> Option<&ResultMapDef> {
        self.result_maps.iter().find(|result_map| result_map.id == id)
    }

    /// The statement enclosing `offset`.
    ///
    /// The innermost element carrying an `id` wins; if that element is not a
    /// statement (a `<sql>` fragment, a `resultMap`), there is no statement.
    #[must_use]
    pub fn enclosing_statement(&self, offset: usize) -> Option<&StatementDef> {
        let innermost = self
            .id_elements
            .iter()
            .filter(|element| element.range.contains(offset))
            .min_by_key(|element| element.range.len())?;

        StatementKind::from_tag(&innermost.tag)?;
        self.statements
            .iter()
            .find(|statement| statement.range == innermost.range)
    }

    /// The statement whose `resultMap` attribute value touches `offset`.
    #[must_use]
    pub fn result_map_reference_at(&self, offset: usize) -> Option<&AttributeValue> {
        self.statements
            .iter()
            .filter_map(|statement| statement.result_map.as_ref())
            .find(|value| value.range.touches(offset))
    }

    /// The token-like text immediately before the caret.
    ///
    /// Inside an attribute value the fragment starts at the opening quote, so
    /// expressions such as `user != null and user.na` keep their operators.
    /// In element text it starts after the previous whitespace or tag
    /// delimiter.
    #[must_use]
    pub fn caret_fragment(&self, offset: usize) -> Option<&str> {
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return None;
        }

        if let Some(value) = self
            .attribute_values
            .iter()
            .find(|value| value.touches(offset))
        {
            return Some(&self.text[value.start..offset]);
        }

        let before = &self.text[..offset];
        let start = before
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace() || matches!(c, '>' | '<'))
            .map_or(0, |(i, c)| i + c.len_utf8());
        Some(&before[start..])
    }
}
