pub mod generate;
pub mod output;
pub mod run_log;

pub use generate::{GenerateError, GenerateReport, GenerateRequest};
pub use run_log::{LogEntry, RunLog};
