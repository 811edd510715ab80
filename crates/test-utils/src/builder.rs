//! Fluent construction of [`TypeModel`]s for tests.
//!
//! ```ignore
//! let model = TypeModelBuilder::new()
//!     .class("com.example.User")
//!     .field("name", "java.lang.String")
//!     .getter("getAge", "java.lang.Integer")
//!     .build();
//! ```

use mapper_hir::{AnnotationDef, ClassDef, FieldDef, MethodDef, ParameterDef, TypeModel};

#[derive(Debug, Default)]
pub struct TypeModelBuilder {
    classes: Vec<ClassDef>,
}

impl TypeModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new class; following calls add members to it.
    pub fn class(mut self, name: &str) -> Self {
        self.classes.push(ClassDef {
            name: name.to_string(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        });
        self
    }

    pub fn extends(mut self, superclass: &str) -> Self {
        self.current().superclass = Some(superclass.to_string());
        self
    }

    pub fn field(mut self, name: &str, ty: &str) -> Self {
        self.current().fields.push(FieldDef {
            name: name.to_string(),
            ty: ty.to_string(),
        });
        self
    }

    /// A zero-argument method returning `return_type`.
    pub fn getter(mut self, name: &str, return_type: &str) -> Self {
        self.current().methods.push(MethodDef {
            name: name.to_string(),
            return_type: Some(return_type.to_string()),
            parameters: Vec::new(),
        });
        self
    }

    /// A mapper method. Each parameter is `(name, type, annotation)`, where
    /// the annotation is `None` for an unannotated parameter and
    /// `Some((annotation_name, value))` otherwise.
    pub fn method(
        mut self,
        name: &str,
        parameters: &[(&str, &str, Option<(&str, Option<&str>)>)],
    ) -> Self {
        let parameters = parameters
            .iter()
            .map(|(param_name, ty, annotation)| ParameterDef {
                name: (*param_name).to_string(),
                ty: (*ty).to_string(),
                annotations: annotation
                    .iter()
                    .map(|(annotation_name, value)| AnnotationDef {
                        name: (*annotation_name).to_string(),
                        value: value.map(str::to_string),
                    })
                    .collect(),
            })
            .collect();
        self.current().methods.push(MethodDef {
            name: name.to_string(),
            return_type: None,
            parameters,
        });
        self
    }

    pub fn build(self) -> TypeModel {
        TypeModel::new(self.classes)
    }

    fn current(&mut self) -> &mut ClassDef {
        self.classes
            .last_mut()
            .expect("TypeModelBuilder: call class() before adding members")
    }
}
