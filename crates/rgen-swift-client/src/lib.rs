pub mod emitters;
pub mod escape;
pub mod generator;
pub mod type_mapper;

pub use generator::{SwiftClientGenerator, SwiftClientOptions, SwiftGeneratorError};
