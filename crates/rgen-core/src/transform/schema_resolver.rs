use indexmap::IndexMap;
use log::warn;

use crate::ir::IrType;
use crate::parse::media_type::MediaType;
use crate::parse::ref_resolve::RefResolver;
use crate::parse::schema::{Schema, SchemaOrRef, SchemaType, TypeSet};

use super::casing::pascal_case;

/// The declared type of a parameter schema. Unreadable schemas (a dangling
/// `$ref`, a cycle, no `type`) degrade to `IrType::Any`.
pub fn parameter_type(resolver: &RefResolver<'_>, schema: Option<&SchemaOrRef>) -> IrType {
    declared_type(resolver, schema, 0)
}

/// Array nesting deeper than this is rendered as `Any`; it also stops
/// self-referencing `items`.
const MAX_ARRAY_DEPTH: usize = 8;

fn declared_type(resolver: &RefResolver<'_>, schema: Option<&SchemaOrRef>, depth: usize) -> IrType {
    let Some(schema) = schema else {
        return IrType::Any;
    };
    if depth > MAX_ARRAY_DEPTH {
        return IrType::Any;
    }
    match resolver.schema(schema) {
        Ok(resolved) => schema_type(resolver, resolved.value, depth),
        Err(e) => {
            warn!("falling back to Any for unreadable parameter schema: {e}");
            IrType::Any
        }
    }
}

fn schema_type(resolver: &RefResolver<'_>, schema: &Schema, depth: usize) -> IrType {
    let keyword = match &schema.schema_type {
        None => return IrType::Any,
        Some(TypeSet::Single(t)) => *t,
        Some(TypeSet::Multiple(types)) => {
            // `[string, "null"]` is how 3.1 spells a nullable string.
            let mut non_null = types.iter().filter(|t| **t != SchemaType::Null);
            match (non_null.next(), non_null.next()) {
                (Some(t), None) => *t,
                _ => return IrType::Any,
            }
        }
        Some(TypeSet::Other(serde_json::Value::String(s))) => return IrType::Other(s.clone()),
        Some(TypeSet::Other(_)) => return IrType::Any,
    };
    match keyword {
        SchemaType::String => IrType::String,
        SchemaType::Number => IrType::Number,
        SchemaType::Integer => IrType::Integer,
        SchemaType::Boolean => IrType::Boolean,
        SchemaType::Object => IrType::Object,
        SchemaType::Null => IrType::Null,
        SchemaType::Array => {
            let items = declared_type(resolver, schema.items.as_deref(), depth + 1);
            IrType::Array(Box::new(items))
        }
    }
}

/// A type name for a `content` map: the component name of its first
/// schema's `$ref`, else that schema's `title`. JSON content is preferred.
pub fn content_type_name(
    resolver: &RefResolver<'_>,
    content: &IndexMap<String, MediaType>,
) -> Option<String> {
    let media = content
        .get("application/json")
        .or_else(|| content.values().next())?;
    let schema = media.schema.as_ref()?;
    match resolver.schema(schema) {
        Ok(resolved) => resolved
            .name
            .or(resolved.value.title.as_deref())
            .map(pascal_case)
            .filter(|name| !name.is_empty()),
        Err(e) => {
            warn!("no type name for unreadable schema: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const SPEC: &str = r##"
openapi: "3.1.0"
info:
  title: Types
  version: "1.0"
paths: {}
components:
  schemas:
    PetId:
      type: integer
    pet_list:
      type: array
      items:
        type: string
    Tree:
      type: array
      items:
        $ref: "#/components/schemas/Tree"
"##;

    fn schema(yaml: &str) -> SchemaOrRef {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_inline_types() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let resolver = RefResolver::new(&spec);
        let s = schema("type: string");
        assert_eq!(parameter_type(&resolver, Some(&s)), IrType::String);
        let s = schema("type: [boolean, \"null\"]");
        assert_eq!(parameter_type(&resolver, Some(&s)), IrType::Boolean);
        let s = schema("type: [boolean, integer]");
        assert_eq!(parameter_type(&resolver, Some(&s)), IrType::Any);
    }

    #[test]
    fn test_unknown_keyword_kept() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let resolver = RefResolver::new(&spec);
        let s = schema("type: file");
        assert_eq!(
            parameter_type(&resolver, Some(&s)),
            IrType::Other("file".to_string())
        );
    }

    #[test]
    fn test_missing_type_is_any() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let resolver = RefResolver::new(&spec);
        assert_eq!(parameter_type(&resolver, None), IrType::Any);
        let s = schema("description: no type here");
        assert_eq!(parameter_type(&resolver, Some(&s)), IrType::Any);
        let s = schema("$ref: '#/components/schemas/Missing'");
        assert_eq!(parameter_type(&resolver, Some(&s)), IrType::Any);
    }

    #[test]
    fn test_ref_types_follow_components() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let resolver = RefResolver::new(&spec);
        let s = schema("$ref: '#/components/schemas/PetId'");
        assert_eq!(parameter_type(&resolver, Some(&s)), IrType::Integer);
        let s = schema("$ref: '#/components/schemas/pet_list'");
        assert_eq!(
            parameter_type(&resolver, Some(&s)),
            IrType::Array(Box::new(IrType::String))
        );
    }

    #[test]
    fn test_self_referencing_items_terminate() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let resolver = RefResolver::new(&spec);
        let s = schema("$ref: '#/components/schemas/Tree'");
        let mut ty = parameter_type(&resolver, Some(&s));
        let mut depth = 0;
        while let IrType::Array(inner) = ty {
            ty = *inner;
            depth += 1;
        }
        assert_eq!(ty, IrType::Any);
        assert_eq!(depth, MAX_ARRAY_DEPTH + 1);
    }

    #[test]
    fn test_content_type_name() {
        let spec = parse::from_yaml(SPEC).unwrap();
        let resolver = RefResolver::new(&spec);
        let content: IndexMap<String, MediaType> = serde_yaml_ng::from_str(
            "application/json:\n  schema:\n    $ref: '#/components/schemas/pet_list'\n",
        )
        .unwrap();
        assert_eq!(
            content_type_name(&resolver, &content),
            Some("PetList".to_string())
        );

        let content: IndexMap<String, MediaType> = serde_yaml_ng::from_str(
            "text/plain:\n  schema:\n    type: string\n    title: plain text\n",
        )
        .unwrap();
        assert_eq!(
            content_type_name(&resolver, &content),
            Some("PlainText".to_string())
        );

        let content: IndexMap<String, MediaType> =
            serde_yaml_ng::from_str("application/json:\n  schema:\n    type: object\n").unwrap();
        assert_eq!(content_type_name(&resolver, &content), None);
    }
}
