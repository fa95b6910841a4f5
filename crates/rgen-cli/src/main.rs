use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use rgen_cli::generate::{self, GenerateRequest};
use rgen_cli::run_log::RunLog;
use rgen_core::CodeGenerator;
use rgen_core::config::{self, CONFIG_FILE_NAME, RgenConfig};
use rgen_core::ir::IrSpec;
use rgen_swift_client::{SwiftClientGenerator, SwiftClientOptions};

#[derive(Parser)]
#[command(
    name = "rest-generation",
    about = "Generate Swift REST clients from an OpenAPI 3.x spec",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Path to the OpenAPI spec file (YAML or JSON) [default: config `input`]
    spec: Option<PathBuf>,

    /// Directory the `Sources/` tree is written under [default: config `output`]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an OpenAPI spec and render its clients in memory
    Validate {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the parsed IR of an OpenAPI spec
    Inspect {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Write a default .rgen.yaml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        None => cmd_generate(cli.spec, cli.output),

        Some(Commands::Validate { input }) => cmd_validate(input),

        Some(Commands::Inspect { input, format }) => cmd_inspect(input, format),

        Some(Commands::Init { force }) => cmd_init(force),

        Some(Commands::Completions { shell }) => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "rest-generation", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load `.rgen.yaml` from the current directory, falling back to defaults.
fn load_config() -> Result<RgenConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path)?;
    Ok(cfg.unwrap_or_default())
}

fn client_options(cfg: &RgenConfig) -> SwiftClientOptions {
    SwiftClientOptions::from_config(&cfg.client, Local::now().date_naive())
}

fn cmd_generate(spec: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let cfg = load_config()?;
    let request = GenerateRequest {
        spec_path: spec.unwrap_or_else(|| PathBuf::from(&cfg.input)),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&cfg.output)),
        transform: cfg.transform_options(),
        client: client_options(&cfg),
    };

    let mut log = RunLog::new(&cfg.log_file);
    let report = generate::run(&request, &mut log)?;

    for path in &report.written {
        eprintln!("  wrote {}", path.display());
    }
    if !report.failed.is_empty() {
        eprintln!(
            "warning: {} client(s) not written ({}); see {}",
            report.failed.len(),
            report.failed.join(", "),
            log.path().display()
        );
    }
    eprintln!(
        "Generated {} client(s) in {}",
        report.written.len(),
        request.output_dir.display()
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let cfg = load_config()?;
    let ir = generate::load_ir(&input, &cfg.transform_options())?;

    eprintln!("Valid OpenAPI spec: {}", ir.info.title);
    eprintln!("  Version: {}", ir.info.version);
    eprintln!("  Servers: {}", ir.servers.len());
    eprintln!("  Operations: {}", ir.operations.len());

    let generator = SwiftClientGenerator::new()?;
    let files = generator
        .generate(&ir, &client_options(&cfg))
        .context("failed to render clients")?;
    for file in &files {
        eprintln!("  Renders {}", file.path);
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = load_config()?;
    let ir = generate::load_ir(&input, &cfg.transform_options())?;

    let summary = build_inspect_summary(&ir);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &IrSpec) -> serde_json::Value {
    let servers: Vec<serde_json::Value> = ir
        .servers
        .iter()
        .map(|s| {
            serde_json::json!({
                "name": s.display_name(&ir.info.title),
                "url": s.url,
                "file": SwiftClientGenerator::client_path(&s.display_name(&ir.info.title)),
            })
        })
        .collect();

    let operations: Vec<serde_json::Value> = ir
        .operations
        .iter()
        .map(|op| {
            serde_json::json!({
                "name": op.name,
                "method": op.method.as_str(),
                "path": op.path,
                "parameters": op.parameters.iter().map(|p| &p.name).collect::<Vec<_>>(),
                "returns": op.default_response.as_ref().and_then(|r| r.type_name.as_deref()),
                "tags": op.tags,
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": ir.info.title,
            "version": ir.info.version,
            "contact": ir.info.contact_name,
        },
        "servers": servers,
        "operations": operations,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
