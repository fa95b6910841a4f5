use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::transform::TransformOptions;

/// Top-level project configuration loaded from `.rgen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RgenConfig {
    /// Spec used when no spec path is passed on the command line.
    pub input: String,
    /// Output directory used when none is passed on the command line.
    pub output: String,
    /// Run log location, rewritten on every log call.
    pub log_file: String,
    pub naming: NamingConfig,
    pub client: ClientConfig,
}

impl Default for RgenConfig {
    fn default() -> Self {
        Self {
            input: "spec.yaml".to_string(),
            output: ".".to_string(),
            log_file: "logs.txt".to_string(),
            naming: NamingConfig::default(),
            client: ClientConfig::default(),
        }
    }
}

impl RgenConfig {
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            naming_strategy: self.naming.strategy,
            aliases: self.naming.aliases.clone(),
        }
    }
}

/// Naming strategy and aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub strategy: NamingStrategy,
    /// Map from resolved operation name (operationId or route-derived) to custom alias.
    pub aliases: IndexMap<String, String>,
}

/// How operation names are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    #[default]
    UseOperationId,
    UseRouteBased,
}

/// How parameter schema types are spelled in generated Swift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeNaming {
    /// The declared keyword pascal-cased: `string` → `String`, `integer` → `Integer`.
    #[default]
    Pascal,
    /// Swift standard library types: `integer` → `Int`, `array` → `[T]`.
    Native,
}

/// Generated client options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Module providing `RestClient` and the request primitives.
    pub runtime_module: String,
    /// Request timeout in seconds.
    pub timeout: f64,
    /// A `URLRequest.CachePolicy` case name.
    pub cache_policy: String,
    pub type_naming: TypeNaming,
    /// Overrides the spec's contact name in file headers.
    pub author: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            runtime_module: "Rest".to_string(),
            timeout: 60.0,
            cache_policy: "useProtocolCachePolicy".to_string(),
            type_naming: TypeNaming::default(),
            author: None,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".rgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<RgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: RgenConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# rgen configuration
input: spec.yaml
output: .
log_file: logs.txt

naming:
  strategy: use_operation_id  # use_operation_id | use_route_based
  aliases: {}
    # showPetById: pet            # resolved name → custom method name

client:
  runtime_module: Rest
  timeout: 60.0
  cache_policy: useProtocolCachePolicy
  type_naming: pascal           # pascal | native
  # author: Jane Doe            # defaults to the spec's contact name
"#
}
