use indexmap::IndexMap;
use log::{debug, warn};

use crate::config::NamingStrategy;
use crate::error::TransformError;
use crate::ir::*;
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::{ParameterLocation, ParameterOrRef};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::response::ResponseOrRef;
use crate::parse::spec::OpenApiSpec;

use super::casing::pascal_case;
use super::naming::operation_name;
use super::path_template::placeholders;
use super::schema_resolver::{content_type_name, parameter_type};

/// Options controlling how the transform phase resolves operation names.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    pub naming_strategy: NamingStrategy,
    pub aliases: IndexMap<String, String>,
}

/// Transform a parsed OpenAPI spec into the IR.
pub fn transform(spec: &OpenApiSpec) -> Result<IrSpec, TransformError> {
    transform_with_options(spec, &TransformOptions::default())
}

/// Transform with explicit naming options.
pub fn transform_with_options(
    spec: &OpenApiSpec,
    options: &TransformOptions,
) -> Result<IrSpec, TransformError> {
    let resolver = RefResolver::new(spec);

    let info = IrInfo {
        title: spec.info.title.clone(),
        description: spec.info.description.clone(),
        version: spec.info.version.clone(),
        contact_name: spec.info.contact.as_ref().and_then(|c| c.name.clone()),
    };

    let servers = spec
        .servers
        .iter()
        .map(|s| IrServer {
            name: s.name.clone(),
            url: s.resolved_url(),
            description: s.description.clone(),
        })
        .collect();

    let mut operations = Vec::new();
    for (path, item) in &spec.paths {
        collect_operations(&resolver, path, item, options, &mut operations)?;
    }
    debug!(
        "transformed {} operation(s) across {} path(s)",
        operations.len(),
        spec.paths.len()
    );

    Ok(IrSpec {
        info,
        servers,
        operations,
    })
}

fn collect_operations(
    resolver: &RefResolver<'_>,
    path: &str,
    item: &PathItem,
    options: &TransformOptions,
    out: &mut Vec<IrOperation>,
) -> Result<(), TransformError> {
    let methods = [
        (HttpMethod::Get, &item.get),
        (HttpMethod::Post, &item.post),
        (HttpMethod::Put, &item.put),
        (HttpMethod::Delete, &item.delete),
        (HttpMethod::Patch, &item.patch),
        (HttpMethod::Options, &item.options),
        (HttpMethod::Head, &item.head),
        (HttpMethod::Trace, &item.trace),
    ];
    for (method, op) in methods {
        if let Some(op) = op {
            out.push(build_operation(resolver, method, path, item, op, options)?);
        }
    }
    Ok(())
}

fn build_operation(
    resolver: &RefResolver<'_>,
    method: HttpMethod,
    path: &str,
    item: &PathItem,
    op: &Operation,
    options: &TransformOptions,
) -> Result<IrOperation, TransformError> {
    let name = operation_name(
        options.naming_strategy,
        &options.aliases,
        op.operation_id.as_deref(),
        method,
        path,
    );

    let parameters = merge_parameters(
        resolve_parameters(resolver, &item.parameters)?,
        resolve_parameters(resolver, &op.parameters)?,
    );

    for placeholder in placeholders(path) {
        if !parameters.iter().any(|p| p.name == placeholder) {
            warn!("{name}: path placeholder `{placeholder}` has no matching parameter");
        }
    }

    Ok(IrOperation {
        name,
        method,
        path: path.to_string(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        tags: op.tags.clone(),
        parameters,
        request_body: op
            .request_body
            .as_ref()
            .and_then(|body| resolve_request_body(resolver, body)),
        default_response: op
            .responses
            .get("default")
            .map(|resp| resolve_default_response(resolver, resp)),
        deprecated: op.deprecated.unwrap_or(false),
    })
}

/// Path-level parameters first, minus any the operation redeclares with the
/// same name and location; the operation's declaration wins.
fn merge_parameters(path_level: Vec<IrParameter>, op_level: Vec<IrParameter>) -> Vec<IrParameter> {
    let mut merged: Vec<IrParameter> = path_level
        .into_iter()
        .filter(|p| {
            !op_level
                .iter()
                .any(|o| o.name == p.name && o.location == p.location)
        })
        .collect();
    merged.extend(op_level);
    merged
}

fn resolve_parameters(
    resolver: &RefResolver<'_>,
    params: &[ParameterOrRef],
) -> Result<Vec<IrParameter>, TransformError> {
    params
        .iter()
        .map(|p| -> Result<IrParameter, TransformError> {
            let param = resolver.parameter(p)?.value;
            let location = match param.location {
                ParameterLocation::Path => IrParameterLocation::Path,
                ParameterLocation::Query => IrParameterLocation::Query,
                ParameterLocation::Header => IrParameterLocation::Header,
                ParameterLocation::Cookie => IrParameterLocation::Cookie,
            };
            Ok(IrParameter {
                name: param.name.clone(),
                location,
                param_type: parameter_type(resolver, param.schema.as_ref()),
                required: param.required,
            })
        })
        .collect()
}

fn resolve_request_body(
    resolver: &RefResolver<'_>,
    body: &RequestBodyOrRef,
) -> Option<IrRequestBody> {
    let resolved = match resolver.request_body(body) {
        Ok(resolved) => resolved,
        Err(e) => {
            warn!("ignoring unreadable request body: {e}");
            return None;
        }
    };
    let type_name = content_type_name(resolver, &resolved.value.content)
        .or_else(|| resolved.name.map(pascal_case));
    Some(IrRequestBody { type_name })
}

/// The return type of the `default` response: a `$ref`'d response's
/// component name, else the name derived from its content schema.
fn resolve_default_response(resolver: &RefResolver<'_>, resp: &ResponseOrRef) -> IrResponse {
    match resolver.response(resp) {
        Ok(resolved) => IrResponse {
            type_name: resolved
                .name
                .map(pascal_case)
                .or_else(|| content_type_name(resolver, &resolved.value.content)),
        },
        Err(e) => {
            warn!("default response has no usable type: {e}");
            IrResponse { type_name: None }
        }
    }
}
