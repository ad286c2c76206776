//! Core functionality
//!
//! Error types and the command line surface of the inspector binary.

pub mod cli;
pub mod errors;

pub use cli::CliArgs;
pub use errors::{FontglassError, FontglassResult};
