use std::collections::HashSet;

use super::components::Components;
use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::{RequestBody, RequestBodyOrRef};
use super::response::{Response, ResponseOrRef};
use super::schema::{Schema, SchemaOrRef};
use super::spec::OpenApiSpec;
use crate::error::ResolveError;

/// A definition found through the resolver, with the component name it was
/// registered under when it came from a `$ref`.
#[derive(Debug)]
pub struct Resolved<'a, T> {
    pub value: &'a T,
    pub name: Option<&'a str>,
}

/// Looks up `$ref` pointers in `#/components/...` without copying the spec.
/// Reference chains (`A -> B -> C`) are followed; cycles are reported as
/// `ResolveError::CircularRef`.
pub struct RefResolver<'a> {
    components: Option<&'a Components>,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
        }
    }

    pub fn parameter<'s>(
        &self,
        param: &'s ParameterOrRef,
    ) -> Result<Resolved<'s, Parameter>, ResolveError>
    where
        'a: 's,
    {
        let mut visited = HashSet::new();
        let mut current = param;
        let mut name = None;
        loop {
            match current {
                ParameterOrRef::Parameter(value) => return Ok(Resolved { value, name }),
                ParameterOrRef::Ref { ref_path } => {
                    enter(&mut visited, ref_path)?;
                    let (key, next) = self.lookup(ref_path, "parameters", |c| &c.parameters)?;
                    name = Some(key);
                    current = next;
                }
            }
        }
    }

    pub fn request_body<'s>(
        &self,
        body: &'s RequestBodyOrRef,
    ) -> Result<Resolved<'s, RequestBody>, ResolveError>
    where
        'a: 's,
    {
        let mut visited = HashSet::new();
        let mut current = body;
        let mut name = None;
        loop {
            match current {
                RequestBodyOrRef::RequestBody(value) => return Ok(Resolved { value, name }),
                RequestBodyOrRef::Ref { ref_path } => {
                    enter(&mut visited, ref_path)?;
                    let (key, next) =
                        self.lookup(ref_path, "requestBodies", |c| &c.request_bodies)?;
                    name = Some(key);
                    current = next;
                }
            }
        }
    }

    pub fn response<'s>(
        &self,
        resp: &'s ResponseOrRef,
    ) -> Result<Resolved<'s, Response>, ResolveError>
    where
        'a: 's,
    {
        let mut visited = HashSet::new();
        let mut current = resp;
        let mut name = None;
        loop {
            match current {
                ResponseOrRef::Response(value) => return Ok(Resolved { value, name }),
                ResponseOrRef::Ref { ref_path } => {
                    enter(&mut visited, ref_path)?;
                    let (key, next) = self.lookup(ref_path, "responses", |c| &c.responses)?;
                    name = Some(key);
                    current = next;
                }
            }
        }
    }

    /// Resolve a schema. The returned name is the first component name in
    /// the chain, i.e. the one the spec author referred to.
    pub fn schema<'s>(&self, schema: &'s SchemaOrRef) -> Result<Resolved<'s, Schema>, ResolveError>
    where
        'a: 's,
    {
        let mut visited = HashSet::new();
        let mut current = schema;
        let mut name = None;
        loop {
            match current {
                SchemaOrRef::Schema(value) => {
                    return Ok(Resolved {
                        value: value.as_ref(),
                        name,
                    });
                }
                SchemaOrRef::Ref { ref_path } => {
                    enter(&mut visited, ref_path)?;
                    let (key, next) = self.lookup(ref_path, "schemas", |c| &c.schemas)?;
                    name = name.or(Some(key));
                    current = next;
                }
            }
        }
    }

    fn lookup<T>(
        &self,
        ref_path: &str,
        section: &str,
        map: impl Fn(&'a Components) -> &'a indexmap::IndexMap<String, T>,
    ) -> Result<(&'a str, &'a T), ResolveError> {
        let name = parse_ref_name(ref_path, section)?;
        self.components
            .map(map)
            .and_then(|m| m.get_key_value(name))
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }
}

fn enter(visited: &mut HashSet<String>, ref_path: &str) -> Result<(), ResolveError> {
    if !visited.insert(ref_path.to_string()) {
        return Err(ResolveError::CircularRef(ref_path.to_string()));
    }
    Ok(())
}

/// Parse a `$ref` path like `#/components/schemas/Foo` and extract the name.
fn parse_ref_name<'a>(ref_path: &'a str, expected_section: &str) -> Result<&'a str, ResolveError> {
    let stripped = ref_path
        .strip_prefix("#/components/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const SPEC: &str = r##"
openapi: "3.0.3"
info:
  title: Refs
  version: "1.0"
paths: {}
components:
  schemas:
    Pet:
      type: object
      title: Animal
    PetAlias:
      $ref: "#/components/schemas/Pet"
    Loop:
      $ref: "#/components/schemas/Loop"
  parameters:
    PetId:
      name: petId
      in: path
      required: true
      schema:
        type: string
"##;

    #[test]
    fn test_parse_ref_name() {
        assert_eq!(
            parse_ref_name("#/components/schemas/Pet", "schemas").unwrap(),
            "Pet"
        );
        assert!(parse_ref_name("#/definitions/Pet", "schemas").is_err());
        assert!(parse_ref_name("#/components/responses/Pet", "schemas").is_err());
    }

    #[test]
    fn test_schema_chain_keeps_first_name() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let resolver = RefResolver::new(&spec);
        let alias = SchemaOrRef::Ref {
            ref_path: "#/components/schemas/PetAlias".to_string(),
        };
        let resolved = resolver.schema(&alias).unwrap();
        assert_eq!(resolved.name, Some("PetAlias"));
        assert_eq!(resolved.value.title.as_deref(), Some("Animal"));
    }

    #[test]
    fn test_schema_cycle_is_an_error() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let resolver = RefResolver::new(&spec);
        let looped = SchemaOrRef::Ref {
            ref_path: "#/components/schemas/Loop".to_string(),
        };
        assert!(matches!(
            resolver.schema(&looped),
            Err(ResolveError::CircularRef(_))
        ));
    }

    #[test]
    fn test_parameter_ref() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let resolver = RefResolver::new(&spec);
        let param = ParameterOrRef::Ref {
            ref_path: "#/components/parameters/PetId".to_string(),
        };
        let resolved = resolver.parameter(&param).unwrap();
        assert_eq!(resolved.value.name, "petId");
        assert!(resolved.value.required);
    }

    #[test]
    fn test_missing_target() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let resolver = RefResolver::new(&spec);
        let missing = SchemaOrRef::Ref {
            ref_path: "#/components/schemas/Nope".to_string(),
        };
        assert!(matches!(
            resolver.schema(&missing),
            Err(ResolveError::RefTargetNotFound(_))
        ));
    }
}
