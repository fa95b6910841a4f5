/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Lowercase form, as used for the runtime's per-verb request calls.
    pub fn as_lower_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Trace => "trace",
        }
    }
}

/// A fully resolved API operation.
#[derive(Debug, Clone)]
pub struct IrOperation {
    /// The generated identifier: operationId, alias or route-derived name.
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    /// Rendered as the method's doc comment, falling back to the first
    /// line of `description`.
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<IrParameter>,
    pub request_body: Option<IrRequestBody>,
    pub default_response: Option<IrResponse>,
    /// Rendered as `@available(*, deprecated)`.
    pub deprecated: bool,
}

/// The `default` response of an operation.
#[derive(Debug, Clone)]
pub struct IrResponse {
    /// Pascal-cased type name, when one could be derived.
    pub type_name: Option<String>,
}

/// A resolved path/query/header/cookie parameter.
#[derive(Debug, Clone)]
pub struct IrParameter {
    pub name: String,
    pub location: IrParameterLocation,
    pub param_type: IrType,
    pub required: bool,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// A resolved request body. Only its type name reaches the generated code.
#[derive(Debug, Clone)]
pub struct IrRequestBody {
    pub type_name: Option<String>,
}

/// The declared type of a parameter schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrType {
    String,
    Number,
    Integer,
    Boolean,
    Array(Box<IrType>),
    Object,
    Null,
    /// A type keyword outside JSON Schema's vocabulary, kept verbatim.
    Other(String),
    /// No readable type was declared.
    Any,
}

impl IrType {
    /// The type keyword as written in the spec, `None` for `Any`.
    pub fn keyword(&self) -> Option<&str> {
        match self {
            IrType::String => Some("string"),
            IrType::Number => Some("number"),
            IrType::Integer => Some("integer"),
            IrType::Boolean => Some("boolean"),
            IrType::Array(_) => Some("array"),
            IrType::Object => Some("object"),
            IrType::Null => Some("null"),
            IrType::Other(s) => Some(s),
            IrType::Any => None,
        }
    }
}
