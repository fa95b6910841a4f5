pub mod operations;
pub mod types;

pub use operations::*;
pub use types::{FALLBACK_CLIENT_NAME, IrInfo, IrServer, IrSpec};
