use minijinja::{Environment, Value, context};
use rgen_core::config::TypeNaming;
use rgen_core::ir::{IrOperation, IrParameter};
use rgen_core::transform::path_template::rewrite_path_template;

use super::OPERATION_TEMPLATE;
use crate::escape::{self, flag_identifier};
use crate::type_mapper::ir_type_to_swift;

/// Swift string interpolation tokens.
const INTERPOLATION_OPEN: &str = "\\(";
const INTERPOLATION_CLOSE: &str = ")";

/// Emit one `public func` calling the runtime's request primitive for the
/// operation's verb. The result has no trailing newline.
pub fn emit_operation(
    env: &Environment<'_>,
    op: &IrOperation,
    type_naming: TypeNaming,
) -> Result<String, minijinja::Error> {
    flag_identifier("method", &op.name);

    let params: Vec<Value> = op
        .parameters
        .iter()
        .map(|p| build_param(p, type_naming))
        .collect();

    let return_type = op
        .default_response
        .as_ref()
        .and_then(|r| r.type_name.clone());
    if let Some(name) = &return_type {
        flag_identifier("return type", name);
    }

    // Escape before rewriting so the interpolation's own backslash survives.
    let path = rewrite_path_template(
        &escape::swift_string(op.path.clone()),
        INTERPOLATION_OPEN,
        INTERPOLATION_CLOSE,
    );

    let tmpl = env.get_template(OPERATION_TEMPLATE)?;
    let rendered = tmpl.render(context! {
        doc => doc_line(op),
        deprecated => op.deprecated,
        name => op.name.clone(),
        params => params,
        return_type => return_type,
        method => op.method.as_lower_str(),
        path => path,
        body_type => op.request_body.as_ref().and_then(|b| b.type_name.clone()),
    })?;
    Ok(rendered.trim_end().to_string())
}

/// The summary, else the first non-blank line of the description.
fn doc_line(op: &IrOperation) -> Option<String> {
    op.summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            op.description
                .as_deref()
                .and_then(|d| d.lines().map(str::trim).find(|l| !l.is_empty()))
        })
        .map(String::from)
}

fn build_param(param: &IrParameter, type_naming: TypeNaming) -> Value {
    flag_identifier("parameter", &param.name);
    context! {
        name => param.name.clone(),
        type_name => ir_type_to_swift(&param.param_type, type_naming),
        required => param.required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitters::environment;
    use rgen_core::ir::{
        HttpMethod, IrParameterLocation, IrRequestBody, IrResponse, IrType,
    };

    fn param(name: &str, param_type: IrType, required: bool) -> IrParameter {
        IrParameter {
            name: name.to_string(),
            location: IrParameterLocation::Path,
            param_type,
            required,
        }
    }

    fn operation(name: &str, method: HttpMethod, path: &str) -> IrOperation {
        IrOperation {
            name: name.to_string(),
            method,
            path: path.to_string(),
            summary: None,
            description: None,
            tags: Vec::new(),
            parameters: Vec::new(),
            request_body: None,
            default_response: None,
            deprecated: false,
        }
    }

    #[test]
    fn test_void_operation() {
        let env = environment().unwrap();
        let mut op = operation("showPetById", HttpMethod::Get, "/pets/{id}");
        op.parameters.push(param("id", IrType::String, true));

        let out = emit_operation(&env, &op, TypeNaming::Pascal).unwrap();
        let expected = r#"    public func showPetById(id: String) async throws {
        try await get(
            path: "/pets/\(id)",
            query: nil, // [URLQueryItem]?
            headers: nil, // [String : String]?
            cachePolicy: cachePolicy,
            timeout: timeout
        )
    }"#;
        assert_eq!(out, expected);
    }

    #[test]
    fn test_return_type_and_optional_params() {
        let env = environment().unwrap();
        let mut op = operation("listPets", HttpMethod::Get, "/stores/{storeId}/pets");
        op.parameters.push(param("storeId", IrType::Integer, true));
        op.parameters.push(param("limit", IrType::Any, false));
        op.default_response = Some(IrResponse {
            type_name: Some("PetPage".to_string()),
        });

        let out = emit_operation(&env, &op, TypeNaming::Pascal).unwrap();
        assert!(out.starts_with(
            "    public func listPets(storeId: Integer, limit: Any?) async throws -> PetPage {\n"
        ));
        assert!(out.contains(r#"path: "/stores/\(storeId)/pets","#));
    }

    #[test]
    fn test_response_without_type_name_is_void() {
        let env = environment().unwrap();
        let mut op = operation("ping", HttpMethod::Head, "/ping");
        op.default_response = Some(IrResponse { type_name: None });
        let out = emit_operation(&env, &op, TypeNaming::Pascal).unwrap();
        assert!(out.starts_with("    public func ping() async throws {\n"));
        assert!(out.contains("try await head(\n"));
    }

    #[test]
    fn test_request_body_note() {
        let env = environment().unwrap();
        let mut op = operation("createPet", HttpMethod::Post, "/pets");
        op.request_body = Some(IrRequestBody {
            type_name: Some("Pet".to_string()),
        });
        let out = emit_operation(&env, &op, TypeNaming::Pascal).unwrap();
        assert!(out.contains("try await post(\n"));
        assert!(out.contains("headers: nil, // [String : String]? body: Pet\n"));
    }

    #[test]
    fn test_native_type_naming() {
        let env = environment().unwrap();
        let mut op = operation("search", HttpMethod::Get, "/search");
        op.parameters.push(param("page", IrType::Integer, false));
        op.parameters.push(param(
            "tags",
            IrType::Array(Box::new(IrType::String)),
            true,
        ));
        let out = emit_operation(&env, &op, TypeNaming::Native).unwrap();
        assert!(out.starts_with("    public func search(page: Int?, tags: [String]) async throws {"));
    }

    #[test]
    fn test_quote_in_path_is_escaped() {
        let env = environment().unwrap();
        let op = operation("odd", HttpMethod::Get, "/say\"hi\"/{id}");
        let out = emit_operation(&env, &op, TypeNaming::Pascal).unwrap();
        assert!(out.contains(r#"path: "/say\"hi\"/\(id)","#));
    }

    #[test]
    fn test_summary_becomes_doc_comment() {
        let env = environment().unwrap();
        let mut op = operation("listPets", HttpMethod::Get, "/pets");
        op.summary = Some("List all pets".to_string());
        op.description = Some("Ignored while a summary exists.".to_string());
        let out = emit_operation(&env, &op, TypeNaming::Pascal).unwrap();
        assert!(out.starts_with(
            "    /// List all pets\n    public func listPets() async throws {\n"
        ));
    }

    #[test]
    fn test_description_first_line_as_fallback() {
        let env = environment().unwrap();
        let mut op = operation("listPets", HttpMethod::Get, "/pets");
        op.summary = Some("   ".to_string());
        op.description = Some("\nReturns every pet.\nPaged by `limit`.".to_string());
        let out = emit_operation(&env, &op, TypeNaming::Pascal).unwrap();
        assert!(out.starts_with("    /// Returns every pet.\n    public func listPets("));
        assert!(!out.contains("Paged by"));
    }

    #[test]
    fn test_deprecated_operation() {
        let env = environment().unwrap();
        let mut op = operation("oldPets", HttpMethod::Get, "/old-pets");
        op.summary = Some("Legacy listing".to_string());
        op.deprecated = true;
        let out = emit_operation(&env, &op, TypeNaming::Pascal).unwrap();
        assert!(out.starts_with(
            "    /// Legacy listing\n    @available(*, deprecated)\n    public func oldPets() async throws {\n"
        ));
    }

    #[test]
    fn test_no_doc_lines_by_default() {
        let env = environment().unwrap();
        let op = operation("plain", HttpMethod::Get, "/plain");
        let out = emit_operation(&env, &op, TypeNaming::Pascal).unwrap();
        assert!(out.starts_with("    public func plain() async throws {\n"));
    }
}
