//! projacc Common - Shared types and utilities
//!
//! This crate provides the identifier types, configuration and error
//! definitions used by the player data loader and the CLI.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
