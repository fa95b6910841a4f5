use chrono::NaiveDate;
use log::{debug, warn};
use minijinja::Environment;
use rgen_core::config::{ClientConfig, TypeNaming};
use rgen_core::ir::{FALLBACK_CLIENT_NAME, IrServer, IrSpec};
use rgen_core::{CodeGenerator, GeneratedFile};
use thiserror::Error;

use crate::emitters;

#[derive(Debug, Error)]
pub enum SwiftGeneratorError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Settings baked into every generated client.
#[derive(Debug, Clone)]
pub struct SwiftClientOptions {
    pub runtime_module: String,
    pub timeout: f64,
    pub cache_policy: String,
    pub type_naming: TypeNaming,
    /// Overrides the spec's contact name in the file header.
    pub author: Option<String>,
    /// Date written into the file header.
    pub date: NaiveDate,
}

impl SwiftClientOptions {
    pub fn from_config(config: &ClientConfig, date: NaiveDate) -> Self {
        Self {
            runtime_module: config.runtime_module.clone(),
            timeout: config.timeout,
            cache_policy: config.cache_policy.clone(),
            type_naming: config.type_naming,
            author: config.author.clone(),
            date,
        }
    }
}

/// Swift client generator: one `actor` per server.
pub struct SwiftClientGenerator {
    env: Environment<'static>,
}

impl SwiftClientGenerator {
    pub fn new() -> Result<Self, SwiftGeneratorError> {
        Ok(Self {
            env: emitters::environment()?,
        })
    }

    /// Relative path of a client: `Sources/<Name>/<Name>.swift`.
    ///
    /// Path separators in the name become `_`, and a name made only of dots
    /// falls back to [`FALLBACK_CLIENT_NAME`], so the file always lands in a
    /// single directory under `Sources/`.
    pub fn client_path(name: &str) -> String {
        let mut safe = name.replace(['/', '\\'], "_");
        if safe.chars().all(|c| c == '.') {
            safe = FALLBACK_CLIENT_NAME.to_string();
        }
        if safe != name {
            warn!("client name {name:?} is not a valid directory name, writing {safe:?}");
        }
        format!("Sources/{safe}/{safe}.swift")
    }

    /// Render the client for a single server.
    pub fn render_server(
        &self,
        ir: &IrSpec,
        server: &IrServer,
        options: &SwiftClientOptions,
    ) -> Result<GeneratedFile, SwiftGeneratorError> {
        let name = server.display_name(&ir.info.title);
        let content = emitters::client::emit_client(&self.env, ir, server, options)?;
        debug!(
            "rendered {name} with {} method(s) for {}",
            ir.operations.len(),
            server.url
        );
        Ok(GeneratedFile {
            path: Self::client_path(&name),
            content,
        })
    }
}

impl CodeGenerator for SwiftClientGenerator {
    type Config = SwiftClientOptions;
    type Error = SwiftGeneratorError;

    fn generate(
        &self,
        ir: &IrSpec,
        config: &SwiftClientOptions,
    ) -> Result<Vec<GeneratedFile>, SwiftGeneratorError> {
        ir.servers
            .iter()
            .map(|server| self.render_server(ir, server, config))
            .collect()
    }
}
