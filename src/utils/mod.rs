pub mod constants;
pub mod errors;

pub use constants::Algorithm;
pub use errors::{LoadError, UnknownAlgorithm, ValidationError};
