//! Name-to-type tables the walker matches path segments against.

use indexmap::IndexMap;
use mapper_hir::{DeclaredParameter, TypeIntrospector, TypeRef};

/// Ordered mapping from binding name to type.
///
/// Iteration follows insertion order, so candidates come out in declaration
/// order at every depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    bindings: IndexMap<String, TypeRef>,
}

impl BindingTable {
    /// Build the top-level table of a statement.
    ///
    /// Only parameters carrying the rename annotation are bindable. A
    /// non-empty annotation value replaces the declared name.
    #[must_use]
    pub fn from_parameters(parameters: &[DeclaredParameter]) -> Self {
        let mut bindings = IndexMap::new();
        for parameter in parameters {
            let Some(annotation) = &parameter.annotation else {
                tracing::trace!(name = %parameter.name, "Skipping unannotated parameter");
                continue;
            };
            let name = annotation
                .value
                .as_deref()
                .filter(|value| !value.is_empty())
                .unwrap_or(&parameter.name);
            bindings.insert(name.to_string(), parameter.ty.clone());
        }
        Self { bindings }
    }

    /// Build the table of members reachable from a value of type `ty`.
    ///
    /// Fields come first; accessor properties follow unless a field with the
    /// same name already exists, in which case the field's type wins.
    pub fn from_members<I>(introspector: &I, ty: &TypeRef) -> Self
    where
        I: TypeIntrospector + ?Sized,
    {
        let mut bindings = IndexMap::new();
        for field in introspector.fields(ty) {
            bindings.insert(field.name, field.ty);
        }
        for property in introspector.accessor_properties(ty) {
            bindings.entry(property.name).or_insert(property.ty);
        }
        Self { bindings }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeRef> {
        self.bindings.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeRef)> {
        self.bindings.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}
