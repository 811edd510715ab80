//! Mapper interface methods behind XML statements.

use crate::introspect::TypeRef;
use crate::type_model::{simple_name, AnnotationDef, MethodDef, TypeModel};

/// The rename annotation found on a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamAnnotation {
    /// Explicit name override, if the annotation carries one
    pub value: Option<String>,
}

/// A parameter of the method a statement is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredParameter {
    pub name: String,
    pub ty: TypeRef,
    /// `None` when the parameter lacks the rename annotation
    pub annotation: Option<ParamAnnotation>,
}

impl DeclaredParameter {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            annotation: None,
        }
    }

    #[must_use]
    pub fn annotated(mut self, value: Option<&str>) -> Self {
        self.annotation = Some(ParamAnnotation {
            value: value.map(str::to_string),
        });
        self
    }
}

/// Whether `annotation` is the configured rename annotation.
///
/// Qualified names must match exactly; an unqualified name matches the
/// configured annotation's simple name.
#[must_use]
pub fn is_param_annotation(annotation: &AnnotationDef, qualified: &str) -> bool {
    if annotation.name.contains('.') {
        annotation.name == qualified
    } else {
        annotation.name == simple_name(qualified)
    }
}

impl TypeModel {
    /// The method a statement is bound to: the method named `statement_id`
    /// on the mapper interface named by `namespace`.
    #[must_use]
    pub fn mapper_method(&self, namespace: &str, statement_id: &str) -> Option<&MethodDef> {
        let interface = self.resolve(namespace)?;
        self.all_methods(interface)
            .into_iter()
            .find(|method| method.name == statement_id)
    }

    /// Declared parameters of `method`, with the rename annotation (if any)
    /// identified by its qualified name.
    #[must_use]
    pub fn declared_parameters(
        &self,
        method: &MethodDef,
        param_annotation: &str,
    ) -> Vec<DeclaredParameter> {
        method
            .parameters
            .iter()
            .map(|parameter| DeclaredParameter {
                name: parameter.name.clone(),
                ty: TypeRef::from(parameter.ty.as_str()),
                annotation: parameter
                    .annotations
                    .iter()
                    .find(|annotation| is_param_annotation(annotation, param_annotation))
                    .map(|annotation| ParamAnnotation {
                        value: annotation.value.clone(),
                    }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_model::{ClassDef, ParameterDef};

    const PARAM: &str = "org.apache.ibatis.annotations.Param";

    fn annotation(name: &str, value: Option<&str>) -> AnnotationDef {
        AnnotationDef {
            name: name.to_string(),
            value: value.map(str::to_string),
        }
    }

    fn mapper_model() -> TypeModel {
        TypeModel::new(vec![ClassDef {
            name: "com.example.UserMapper".to_string(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: vec![MethodDef {
                name: "findByUser".to_string(),
                return_type: Some("com.example.User".to_string()),
                parameters: vec![
                    ParameterDef {
                        name: "user".to_string(),
                        ty: "com.example.User".to_string(),
                        annotations: vec![annotation(PARAM, Some("u"))],
                    },
                    ParameterDef {
                        name: "limit".to_string(),
                        ty: "int".to_string(),
                        annotations: vec![annotation("Param", None)],
                    },
                    ParameterDef {
                        name: "offset".to_string(),
                        ty: "int".to_string(),
                        annotations: vec![annotation("com.other.Param", Some("o"))],
                    },
                ],
            }],
        }])
    }

    #[test]
    fn test_is_param_annotation() {
        assert!(is_param_annotation(&annotation(PARAM, None), PARAM));
        assert!(is_param_annotation(&annotation("Param", None), PARAM));
        assert!(!is_param_annotation(&annotation("com.other.Param", None), PARAM));
        assert!(!is_param_annotation(&annotation("Nullable", None), PARAM));
    }

    #[test]
    fn test_mapper_method_lookup() {
        let model = mapper_model();
        assert!(model.mapper_method("com.example.UserMapper", "findByUser").is_some());
        assert!(model.mapper_method("com.example.UserMapper", "missing").is_none());
        assert!(model.mapper_method("com.example.Missing", "findByUser").is_none());
    }

    #[test]
    fn test_declared_parameters() {
        let model = mapper_model();
        let method = model.mapper_method("com.example.UserMapper", "findByUser").unwrap();
        let params = model.declared_parameters(method, PARAM);

        assert_eq!(params.len(), 3);
        assert_eq!(
            params[0],
            DeclaredParameter::new("user", "com.example.User").annotated(Some("u"))
        );
        assert_eq!(params[1], DeclaredParameter::new("limit", "int").annotated(None));
        assert_eq!(params[2].annotation, None);
    }
}
