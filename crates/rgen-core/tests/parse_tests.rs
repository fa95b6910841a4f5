use std::path::Path;

use rgen_core::error::ParseError;
use rgen_core::parse;
use rgen_core::parse::parameter::ParameterOrRef;
use rgen_core::parse::response::ResponseOrRef;
use rgen_core::parse::schema::{SchemaOrRef, SchemaType, TypeSet};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const TWO_SERVERS: &str = include_str!("fixtures/two-servers.yaml");
const FALLBACKS: &str = include_str!("fixtures/fallbacks.json");

#[test]
fn parse_petstore_yaml() {
    let spec = parse::from_yaml(PETSTORE).expect("should parse petstore");
    assert_eq!(spec.openapi, "3.0.3");
    assert_eq!(spec.info.title, "Pet Store");
    assert_eq!(spec.servers.len(), 1);
    assert!(spec.servers[0].name.is_none());
    assert_eq!(spec.paths.len(), 1);

    let get = spec.paths["/pets/{id}"].get.as_ref().expect("should have GET");
    assert_eq!(get.operation_id.as_deref(), Some("showPetById"));
    match &get.parameters[0] {
        ParameterOrRef::Parameter(p) => {
            assert_eq!(p.name, "id");
            assert!(p.required);
        }
        _ => panic!("expected inline parameter"),
    }
    assert!(!get.responses.contains_key("default"));
}

#[test]
fn parse_server_names_and_variables() {
    let spec = parse::from_yaml(TWO_SERVERS).expect("should parse two-servers");
    let names: Vec<_> = spec.servers.iter().map(|s| s.name.as_deref()).collect();
    assert_eq!(names, vec![Some("Public"), Some("Internal")]);
    assert_eq!(
        spec.servers[1].resolved_url(),
        "https://eu-west.internal.example.com"
    );
    assert_eq!(spec.servers[0].resolved_url(), "https://api.example.com/v2");
    assert_eq!(
        spec.info.contact.as_ref().and_then(|c| c.name.as_deref()),
        Some("Jane Doe")
    );
}

#[test]
fn parse_refs_stay_unresolved() {
    let spec = parse::from_yaml(TWO_SERVERS).unwrap();
    let list = spec.paths["/pets"].get.as_ref().unwrap();
    assert!(matches!(
        list.responses.get("default"),
        Some(ResponseOrRef::Ref { ref_path }) if ref_path == "#/components/responses/PetPage"
    ));
    let components = spec.components.as_ref().expect("should have components");
    assert_eq!(components.schemas.len(), 1);
    assert_eq!(components.parameters.len(), 1);
    assert_eq!(components.request_bodies.len(), 1);
}

#[test]
fn parse_json_by_extension() {
    let spec = parse::from_path_contents(Path::new("api/odd.json"), FALLBACKS)
        .expect("should parse JSON");
    assert_eq!(spec.openapi, "3.1.0");

    let put = spec.paths["/files/{name}"].put.as_ref().unwrap();
    let schema_of = |i: usize| match &put.parameters[i] {
        ParameterOrRef::Parameter(p) => p.schema.clone(),
        _ => panic!("expected inline parameter"),
    };
    match schema_of(0) {
        Some(SchemaOrRef::Schema(s)) => assert_eq!(
            s.schema_type,
            Some(TypeSet::Multiple(vec![SchemaType::String, SchemaType::Null]))
        ),
        other => panic!("unexpected schema: {other:?}"),
    }
    match schema_of(1) {
        Some(SchemaOrRef::Schema(s)) => assert_eq!(
            s.schema_type,
            Some(TypeSet::Other(serde_json::Value::String("file".into())))
        ),
        other => panic!("unexpected schema: {other:?}"),
    }
    assert!(schema_of(2).is_none());
}

#[test]
fn yaml_extension_reads_yaml() {
    let spec = parse::from_path_contents(Path::new("spec.yml"), PETSTORE).unwrap();
    assert_eq!(spec.info.title, "Pet Store");
}

#[test]
fn reject_swagger_2() {
    let err =
        parse::from_yaml("openapi: \"2.0\"\ninfo:\n  title: Old\n  version: \"1\"\n").unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedVersion(v) if v == "2.0"));
}

#[test]
fn reject_malformed_yaml() {
    let err = parse::from_yaml("openapi: [unterminated").unwrap_err();
    assert!(matches!(err, ParseError::Yaml(_)));
}
