use heck::ToPascalCase;
use indexmap::IndexMap;

use crate::config::NamingStrategy;
use crate::ir::HttpMethod;

/// Resolve the generated identifier of an operation.
///
/// The operationId is used verbatim under `UseOperationId`; a missing one
/// falls back to [`route_to_name`]. Aliases are applied last and match the
/// resolved name.
pub fn operation_name(
    strategy: NamingStrategy,
    aliases: &IndexMap<String, String>,
    operation_id: Option<&str>,
    method: HttpMethod,
    path: &str,
) -> String {
    let resolved = match (strategy, operation_id) {
        (NamingStrategy::UseOperationId, Some(id)) if !id.trim().is_empty() => id.to_string(),
        _ => route_to_name(method, path),
    };
    match aliases.get(&resolved) {
        Some(alias) => alias.clone(),
        None => resolved,
    }
}

/// Derive a lower camel case name from the verb and the literal path segments.
///
/// `GET` on a path ending in a placeholder reads a single item (`get`,
/// with the last resource singularized); `GET` on a collection lists it.
/// Other verbs map to `create`, `update`, `delete`, `patch`, ...
///
/// ```
/// use rgen_core::ir::HttpMethod;
/// use rgen_core::transform::naming::route_to_name;
///
/// assert_eq!(route_to_name(HttpMethod::Get, "/pets"), "listPets");
/// assert_eq!(route_to_name(HttpMethod::Get, "/pets/{petId}"), "getPet");
/// assert_eq!(route_to_name(HttpMethod::Post, "/stores/{id}/pets"), "createStoresPets");
/// ```
pub fn route_to_name(method: HttpMethod, path: &str) -> String {
    let mut literals: Vec<&str> = Vec::new();
    let mut trailing_placeholder = false;
    for seg in path.split('/').filter(|s| !s.is_empty()) {
        trailing_placeholder = seg.starts_with('{') && seg.ends_with('}');
        if !trailing_placeholder {
            literals.push(seg);
        }
    }

    let verb = match method {
        HttpMethod::Get if trailing_placeholder => "get",
        HttpMethod::Get => "list",
        HttpMethod::Post => "create",
        HttpMethod::Put => "update",
        HttpMethod::Delete => "delete",
        HttpMethod::Patch => "patch",
        HttpMethod::Options => "options",
        HttpMethod::Head => "head",
        HttpMethod::Trace => "trace",
    };

    let last = literals.len().saturating_sub(1);
    let resource: String = literals
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            if i == last && trailing_placeholder {
                singular(seg).to_pascal_case()
            } else {
                seg.to_pascal_case()
            }
        })
        .collect();

    format!("{verb}{resource}")
}

/// English plural stripping good enough for resource names.
fn singular(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies")
        && !stem.is_empty()
    {
        return format!("{stem}y");
    }
    for suffix in ["ses", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.len() > 1 && word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}
