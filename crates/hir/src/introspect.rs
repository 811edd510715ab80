//! Field and accessor-property introspection over a type reference.

use crate::type_model::TypeModel;
use std::sync::Arc;

/// A reference to a nominal type, as written in the type model.
///
/// Whether it names a structured type is up to the [`TypeIntrospector`];
/// unresolvable references (primitives, generic instantiations, classes
/// outside the model) behave as leaf types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef(Arc<str>);

impl TypeRef {
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A named member of a structured type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub ty: TypeRef,
}

impl Member {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Read-only view of a type system's member metadata.
///
/// Implemented by [`TypeModel`]; tests and other hosts can provide their own.
pub trait TypeIntrospector {
    /// Declared fields (own and inherited), in declaration order.
    fn fields(&self, ty: &TypeRef) -> Vec<Member>;

    /// Properties derived from zero-argument `getX`/`isX` methods.
    fn accessor_properties(&self, ty: &TypeRef) -> Vec<Member>;

    /// `false` for leaf types.
    fn is_structured(&self, ty: &TypeRef) -> bool;
}

/// Derive a property name from an accessor method name.
///
/// `getUserName` gives `userName`, `isActive` gives `active`. Names that are
/// only the prefix (`get`, `is`) or do not start with one give `None`.
#[must_use]
pub fn accessor_property_name(method_name: &str) -> Option<String> {
    let rest = method_name
        .strip_prefix("get")
        .or_else(|| method_name.strip_prefix("is"))
        .filter(|rest| !rest.is_empty())?;

    let mut chars = rest.chars();
    let first = chars.next()?;
    Some(first.to_lowercase().chain(chars).collect())
}

impl TypeIntrospector for TypeModel {
    fn fields(&self, ty: &TypeRef) -> Vec<Member> {
        let Some(class) = self.resolve(ty.name()) else {
            return Vec::new();
        };
        self.all_fields(class)
            .into_iter()
            .map(|field| Member::new(field.name.as_str(), field.ty.as_str()))
            .collect()
    }

    fn accessor_properties(&self, ty: &TypeRef) -> Vec<Member> {
        let Some(class) = self.resolve(ty.name()) else {
            return Vec::new();
        };
        let mut properties: Vec<Member> = Vec::new();
        for method in self.all_methods(class) {
            if !method.parameters.is_empty() {
                continue;
            }
            let (Some(name), Some(return_type)) =
                (accessor_property_name(&method.name), &method.return_type)
            else {
                continue;
            };
            // Overrides come first; the inherited declaration is dropped
            if properties.iter().any(|p| p.name == name) {
                continue;
            }
            properties.push(Member::new(name, return_type.as_str()));
        }
        properties
    }

    fn is_structured(&self, ty: &TypeRef) -> bool {
        self.resolve(ty.name()).is_some()
    }
}
