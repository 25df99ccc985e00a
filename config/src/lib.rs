//! Configuration front-ends for chainwords.
//!
//! [`literate`] builds a chain by describing it in code; [`ChainDefinition`]
//! describes one in TOML.

mod definition;
mod error;
pub mod literate;

pub use definition::{ChainDefinition, UpdaterSpec, WordDefinition};
pub use error::ConfigError;
pub use literate::{Literate, curry, for_function};
