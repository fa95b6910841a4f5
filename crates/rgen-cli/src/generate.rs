use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use rgen_core::error::{ParseError, TransformError};
use rgen_core::ir::IrSpec;
use rgen_core::parse;
use rgen_core::transform::{self, TransformOptions};
use rgen_swift_client::{SwiftClientGenerator, SwiftClientOptions, SwiftGeneratorError};
use thiserror::Error;

use crate::output::write_generated;
use crate::run_log::RunLog;

/// Errors that end a run. Per-server failures are not among them; they are
/// logged and counted in [`GenerateReport::failed`].
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Spec not found at path: {}", path.display())]
    SpecNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Generator(#[from] SwiftGeneratorError),
}

/// Inputs of one generation run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub spec_path: PathBuf,
    pub output_dir: PathBuf,
    pub transform: TransformOptions,
    pub client: SwiftClientOptions,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Files written, in server order.
    pub written: Vec<PathBuf>,
    /// Names of clients that could not be rendered or written.
    pub failed: Vec<String>,
}

/// Read, parse and transform a spec file.
pub fn load_ir(path: &Path, options: &TransformOptions) -> Result<IrSpec, GenerateError> {
    let content = fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let spec = parse::from_path_contents(path, &content)?;
    let ir = transform::transform_with_options(&spec, options)?;
    Ok(ir)
}

/// Generate one Swift client per server of the spec.
///
/// A missing spec or one that does not parse ends the run with an error.
/// Once the spec is loaded, a server whose client cannot be rendered or
/// written is recorded in the log and skipped; the run still succeeds.
pub fn run(request: &GenerateRequest, log: &mut RunLog) -> Result<GenerateReport, GenerateError> {
    log.record("Running Rest Generation");

    if !request.spec_path.exists() {
        log.record(format!(
            "Path for spec not found: {}",
            request.spec_path.display()
        ));
        return Err(GenerateError::SpecNotFound {
            path: request.spec_path.clone(),
        });
    }

    log.record("Instantiating spec file...");
    let ir = match load_ir(&request.spec_path, &request.transform) {
        Ok(ir) => ir,
        Err(e) => {
            log.record(format!("Failed to instantiate spec file with error: {e}"));
            return Err(e);
        }
    };
    log.record("Instantiated spec file!");

    if ir.servers.is_empty() {
        log.record("No servers found");
        return Ok(GenerateReport::default());
    }

    let generator = match SwiftClientGenerator::new() {
        Ok(generator) => generator,
        Err(e) => {
            log.record(format!("Failed to load client templates with error: {e}"));
            return Err(e.into());
        }
    };

    let mut report = GenerateReport::default();
    for server in &ir.servers {
        let name = server.display_name(&ir.info.title);
        log.record(format!("Creating {name} Interface"));

        let file = match generator.render_server(&ir, server, &request.client) {
            Ok(file) => file,
            Err(e) => {
                log.record(format!("Failed to generate {name}.swift with error: {e}"));
                report.failed.push(name);
                continue;
            }
        };
        log.record(format!("Generated {name}.swift!"));
        log.record(file.content.clone());

        log.record(format!("Saving {name}.swift to /Sources/{name}/"));
        match write_generated(&request.output_dir, &file) {
            Ok(path) => {
                debug!("wrote {}", path.display());
                log.record(format!("Wrote contents to {name}.swift successfully!"));
                report.written.push(path);
            }
            Err(e) => {
                log.record(format!(
                    "Failed to write contents to {name}.swift with error: {e}"
                ));
                report.failed.push(name);
            }
        }
    }

    Ok(report)
}
