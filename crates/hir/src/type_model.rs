//! In-memory symbol table of the classes that mapper parameters refer to.
//!
//! A type model is produced by whatever build tooling can see the Java
//! sources (annotation processor, compiler plugin, hand-written fixture) and
//! serialised as JSON or YAML:
//!
//! ```json
//! { "types": [
//!   { "name": "com.example.User",
//!     "fields": [{ "name": "name", "type": "java.lang.String" }],
//!     "methods": [{ "name": "getAge", "returnType": "java.lang.Integer" }] }
//! ] }
//! ```

use crate::{Result, TypeModelError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDef {
    /// Fully qualified name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
}

impl ClassDef {
    /// Unqualified class name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDef {
    pub name: String,
    /// `None` for `void`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationDef {
    pub name: String,
    /// The annotation's first (or only) attribute value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Serialised form of a type model file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TypeModelFile {
    #[serde(default)]
    types: Vec<ClassDef>,
}

/// Indexed collection of [`ClassDef`]s.
#[derive(Debug, Clone, Default)]
pub struct TypeModel {
    classes: Vec<ClassDef>,
    by_name: HashMap<String, usize>,
    /// Simple name -> index, `None` when the simple name is ambiguous
    by_simple_name: HashMap<String, Option<usize>>,
}

impl TypeModel {
    #[must_use]
    pub fn new(classes: Vec<ClassDef>) -> Self {
        let mut model = Self::default();
        model.extend(classes);
        model
    }

    /// Add classes; a class with an already-known name replaces the old one.
    pub fn extend(&mut self, classes: impl IntoIterator<Item = ClassDef>) {
        for class in classes {
            if let Some(&index) = self.by_name.get(&class.name) {
                self.classes[index] = class;
                continue;
            }
            let index = self.classes.len();
            self.by_name.insert(class.name.clone(), index);
            self.by_simple_name
                .entry(class.simple_name().to_string())
                .and_modify(|slot| *slot = None)
                .or_insert(Some(index));
            self.classes.push(class);
        }
    }

    /// Parse a model from JSON text.
    pub fn from_json(text: &str, path: &Path) -> Result<Self> {
        let file: TypeModelFile =
            serde_json::from_str(text).map_err(|e| TypeModelError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self::new(file.types))
    }

    /// Parse a model from YAML text.
    pub fn from_yaml(text: &str, path: &Path) -> Result<Self> {
        let file: TypeModelFile =
            serde_yaml::from_str(text).map_err(|e| TypeModelError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self::new(file.types))
    }

    /// Load and merge model files; format is chosen by extension.
    #[tracing::instrument(skip(paths))]
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut model = Self::default();
        for path in paths {
            let path = path.as_ref();
            let text = std::fs::read_to_string(path).map_err(|source| TypeModelError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let loaded = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => Self::from_json(&text, path)?,
                Some("yml" | "yaml") => Self::from_yaml(&text, path)?,
                _ => return Err(TypeModelError::UnsupportedFormat(path.to_path_buf())),
            };
            tracing::debug!(path = %path.display(), classes = loaded.len(), "Loaded type model");
            model.extend(loaded.classes);
        }
        Ok(model)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDef> {
        self.classes.iter()
    }

    /// Resolve a type reference to a class.
    ///
    /// Generic instantiations and arrays do not resolve. Unqualified names
    /// resolve when exactly one class carries that simple name.
    #[must_use]
    pub fn resolve(&self, ty: &str) -> Option<&ClassDef> {
        let ty = ty.trim();
        if ty.is_empty() || ty.contains(['<', '[']) {
            return None;
        }
        if let Some(&index) = self.by_name.get(ty) {
            return Some(&self.classes[index]);
        }
        if ty.contains('.') {
            return None;
        }
        self.by_simple_name
            .get(ty)
            .copied()
            .flatten()
            .map(|index| &self.classes[index])
    }

    /// Supertypes of `class` in lookup order: superclass chain first,
    /// then interfaces, each visited once.
    fn supertypes<'a>(&'a self, class: &'a ClassDef) -> Vec<&'a ClassDef> {
        let mut seen = HashSet::from([class.name.as_str()]);
        let mut order = Vec::new();

        let mut current = class;
        while let Some(parent) = current
            .superclass
            .as_deref()
            .and_then(|name| self.resolve(name))
        {
            if !seen.insert(parent.name.as_str()) {
                break;
            }
            order.push(parent);
            current = parent;
        }

        // Interfaces of the class and its chain, then their super-interfaces
        let mut queue: VecDeque<&ClassDef> =
            std::iter::once(class).chain(order.iter().copied()).collect();
        while let Some(current) = queue.pop_front() {
            for parent in current
                .interfaces
                .iter()
                .filter_map(|name| self.resolve(name))
            {
                if seen.insert(parent.name.as_str()) {
                    order.push(parent);
                    queue.push_back(parent);
                }
            }
        }
        order
    }

    /// Own and inherited fields; a field hides same-named inherited ones.
    #[must_use]
    pub fn all_fields<'a>(&'a self, class: &'a ClassDef) -> Vec<&'a FieldDef> {
        let mut names = HashSet::new();
        std::iter::once(class)
            .chain(self.supertypes(class))
            .flat_map(|c| c.fields.iter())
            .filter(|field| names.insert(field.name.as_str()))
            .collect()
    }

    /// Own and inherited methods; overriding methods come first.
    #[must_use]
    pub fn all_methods<'a>(&'a self, class: &'a ClassDef) -> Vec<&'a MethodDef> {
        std::iter::once(class)
            .chain(self.supertypes(class))
            .flat_map(|c| c.methods.iter())
            .collect()
    }
}

/// The part of a qualified name after the last `.`.
#[must_use]
pub fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> ClassDef {
        ClassDef {
            name: name.to_string(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    fn field(name: &str, ty: &str) -> FieldDef {
        FieldDef {
            name: name.to_string(),
            ty: ty.to_string(),
        }
    }

    #[test]
    fn test_resolve_qualified_and_simple() {
        let model = TypeModel::new(vec![class("com.example.User")]);
        assert!(model.resolve("com.example.User").is_some());
        assert!(model.resolve("User").is_some());
        assert!(model.resolve("org.other.User").is_none());
        assert!(model.resolve("java.util.List<com.example.User>").is_none());
        assert!(model.resolve("com.example.User[]").is_none());
        assert!(model.resolve("int").is_none());
    }

    #[test]
    fn test_ambiguous_simple_name_does_not_resolve() {
        let model = TypeModel::new(vec![class("a.User"), class("b.User")]);
        assert!(model.resolve("User").is_none());
        assert!(model.resolve("a.User").is_some());
    }

    #[test]
    fn test_extend_replaces_same_name() {
        let mut model = TypeModel::new(vec![class("a.User")]);
        let mut replacement = class("a.User");
        replacement.fields.push(field("id", "long"));
        model.extend([replacement]);
        assert_eq!(model.len(), 1);
        assert_eq!(model.resolve("a.User").unwrap().fields.len(), 1);
    }

    #[test]
    fn test_all_fields_include_inherited_and_hide_shadowed() {
        let mut base = class("a.Base");
        base.fields = vec![field("id", "long"), field("name", "java.lang.Object")];
        let mut user = class("a.User");
        user.superclass = Some("a.Base".to_string());
        user.fields = vec![field("name", "java.lang.String")];

        let model = TypeModel::new(vec![base, user]);
        let user = model.resolve("a.User").unwrap();
        let fields: Vec<_> = model
            .all_fields(user)
            .into_iter()
            .map(|f| (f.name.as_str(), f.ty.as_str()))
            .collect();
        assert_eq!(fields, vec![("name", "java.lang.String"), ("id", "long")]);
    }

    #[test]
    fn test_superclass_chain_before_interfaces() {
        let mut a = class("x.A");
        a.fields.push(field("a", "int"));
        let mut b = class("x.B");
        b.superclass = Some("x.A".to_string());
        b.fields.push(field("b", "int"));
        let mut i = class("x.I");
        i.interfaces = vec!["x.J".to_string()];
        i.fields.push(field("i", "int"));
        let mut j = class("x.J");
        j.fields.push(field("j", "int"));
        let mut c = class("x.C");
        c.superclass = Some("x.B".to_string());
        c.interfaces = vec!["x.I".to_string()];
        c.fields.push(field("c", "int"));

        let model = TypeModel::new(vec![a, b, i, j, c]);
        let c = model.resolve("x.C").unwrap();
        let names: Vec<_> = model.all_fields(c).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a", "i", "j"]);
    }

    #[test]
    fn test_cyclic_hierarchy_terminates() {
        let mut a = class("x.A");
        a.superclass = Some("x.B".to_string());
        a.fields.push(field("a", "int"));
        let mut b = class("x.B");
        b.superclass = Some("x.A".to_string());
        b.fields.push(field("b", "int"));

        let model = TypeModel::new(vec![a, b]);
        let a = model.resolve("x.A").unwrap();
        assert_eq!(model.all_fields(a).len(), 2);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r"
types:
  - name: com.example.User
    fields:
      - name: name
        type: java.lang.String
    methods:
      - name: getAge
        returnType: java.lang.Integer
";
        let model = TypeModel::from_yaml(yaml, Path::new("model.yaml")).unwrap();
        let user = model.resolve("User").unwrap();
        assert_eq!(user.methods[0].return_type.as_deref(), Some("java.lang.Integer"));
        assert!(user.methods[0].parameters.is_empty());
    }

    #[test]
    fn test_from_json_error() {
        let err = TypeModel::from_json("{", Path::new("model.json")).unwrap_err();
        assert!(matches!(err, TypeModelError::Parse { .. }));
    }
}
