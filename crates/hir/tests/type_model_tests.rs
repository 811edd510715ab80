//! Loading type models from disk and introspecting the shared fixtures.

use mapper_hir::{TypeIntrospector, TypeModel, TypeModelError, TypeRef};
use mapper_test_utils::{user_model, PARAM_ANNOTATION};
use std::fs;

fn names(members: &[mapper_hir::Member]) -> Vec<&str> {
    members.iter().map(|member| member.name.as_str()).collect()
}

#[test]
fn test_load_merges_json_and_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("entities.json");
    let yaml = dir.path().join("mappers.yaml");
    fs::write(
        &json,
        r#"{
  "types": [
    {
      "name": "com.example.Base",
      "fields": [{ "name": "id", "type": "long" }]
    },
    {
      "name": "com.example.Order",
      "superclass": "com.example.Base",
      "fields": [{ "name": "total", "type": "java.math.BigDecimal" }],
      "methods": [{ "name": "isPaid", "returnType": "boolean" }]
    }
  ]
}"#,
    )
    .unwrap();
    fs::write(
        &yaml,
        r"
types:
  - name: com.example.OrderMapper
    methods:
      - name: findOrder
        parameters:
          - name: order
            type: Order
            annotations:
              - name: Param
                value: o
",
    )
    .unwrap();

    let model = TypeModel::load(&[&json, &yaml]).unwrap();
    assert_eq!(model.len(), 3);

    let order = TypeRef::from("com.example.Order");
    assert_eq!(names(&model.fields(&order)), vec!["total", "id"]);
    assert_eq!(names(&model.accessor_properties(&order)), vec!["paid"]);

    let method = model
        .mapper_method("com.example.OrderMapper", "findOrder")
        .unwrap();
    let parameters = model.declared_parameters(method, PARAM_ANNOTATION);
    assert_eq!(parameters[0].ty.name(), "Order");
    assert!(model.is_structured(&parameters[0].ty));
    assert_eq!(
        parameters[0]
            .annotation
            .as_ref()
            .and_then(|a| a.value.as_deref()),
        Some("o")
    );
}

#[test]
fn test_load_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(matches!(
        TypeModel::load(&[&missing]),
        Err(TypeModelError::Io { .. })
    ));

    let malformed = dir.path().join("broken.yaml");
    fs::write(&malformed, "types: [").unwrap();
    assert!(matches!(
        TypeModel::load(&[&malformed]),
        Err(TypeModelError::Parse { .. })
    ));

    let unsupported = dir.path().join("model.toml");
    fs::write(&unsupported, "").unwrap();
    assert!(matches!(
        TypeModel::load(&[&unsupported]),
        Err(TypeModelError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_user_fixture_introspection() {
    let model = user_model();
    let user = TypeRef::from("com.example.User");

    assert_eq!(names(&model.fields(&user)), vec!["name", "address", "manager"]);
    assert_eq!(
        names(&model.accessor_properties(&user)),
        vec!["age", "active", "name"]
    );
    assert!(!model.is_structured(&TypeRef::from("java.lang.String")));
    assert!(!model.is_structured(&TypeRef::from("java.util.List<com.example.User>")));
}
