use super::operations::IrOperation;

/// A fully resolved, generator-ready intermediate representation of an OpenAPI spec.
#[derive(Debug, Clone)]
pub struct IrSpec {
    pub info: IrInfo,
    pub servers: Vec<IrServer>,
    pub operations: Vec<IrOperation>,
}

/// API metadata.
#[derive(Debug, Clone)]
pub struct IrInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
    pub contact_name: Option<String>,
}

/// A server entry. Each one yields one generated client.
#[derive(Debug, Clone)]
pub struct IrServer {
    pub name: Option<String>,
    pub url: String,
    pub description: Option<String>,
}

/// Client name used when neither the server nor the title yields one.
pub const FALLBACK_CLIENT_NAME: &str = "Client";

impl IrServer {
    /// The name of the generated client: the explicit server name, or the
    /// spec title with spaces removed. Never empty.
    pub fn display_name(&self, title: &str) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim)
            && !name.is_empty()
        {
            return name.to_string();
        }
        let stripped: String = title.chars().filter(|c| *c != ' ').collect();
        if stripped.is_empty() {
            FALLBACK_CLIENT_NAME.to_string()
        } else {
            stripped
        }
    }
}
