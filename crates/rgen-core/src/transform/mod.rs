pub mod casing;
pub mod naming;
pub mod path_template;
pub mod schema_resolver;
pub mod spec_to_ir;

pub use spec_to_ir::{TransformOptions, transform, transform_with_options};
