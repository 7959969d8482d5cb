//! Core operations.
//!
//! This module contains the business logic for the CLI commands,
//! separated from argument parsing and output rendering.

pub mod generate;
pub mod services;

pub use generate::{generate, pipeline};
pub use services::services;
