//! Mapper XML syntax layer.
//!
//! Parses mapper files into an owned [`MapperDocument`] that records what the
//! IDE layer needs: the root tag and namespace, `resultMap` definitions,
//! statements, and enough byte ranges to find the element and attribute
//! under a caret. Parsing goes through `roxmltree`; the parsed tree is not
//! kept around.

mod error;
mod line_index;
mod mapper;

pub use error::{Result, SyntaxError};
pub use line_index::LineIndex;
pub use mapper::{
    parse_mapper, AttributeValue, IdElement, MapperDocument, ResultMapDef, StatementDef,
    StatementKind, MAPPER_TAG, NAMESPACE_ATTR,
};
