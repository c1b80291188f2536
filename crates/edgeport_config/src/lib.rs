//! Parsing and validation of `edgeport.toml` placer configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`PlacerConfig`] holding the search budget, the overlap penalty, the step
//! schedule, and the port footprint width.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::*;
