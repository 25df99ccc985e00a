//! Core value and path types for chainwords.
//!
//! This crate contains pure data types with no IO, no async, and minimal dependencies:
//! the dynamic [`Value`] carried in argument snapshots, and the path addressing used
//! to read and write nested structure inside those values without mutating them.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

pub mod path;
mod value;

pub use path::{Key, Path, get, normalize, resolve_path, set};
pub use value::{UNSET, Value};
