//! Semantic layer for mapper parameter resolution.
//!
//! - [`TypeModel`]: the classes, fields and methods parameters refer to
//! - [`TypeIntrospector`]: member lookup used by the completion walker
//! - [`DeclaredParameter`]: parameters of the method behind a statement

mod error;
mod introspect;
mod statement;
mod type_model;

pub use error::{Result, TypeModelError};
pub use introspect::{accessor_property_name, Member, TypeIntrospector, TypeRef};
pub use statement::{is_param_annotation, DeclaredParameter, ParamAnnotation};
pub use type_model::{
    simple_name, AnnotationDef, ClassDef, FieldDef, MethodDef, ParameterDef, TypeModel,
};
