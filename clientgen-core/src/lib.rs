// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Core types for the protobuf client generator.
//!
//! This crate holds the static support tables (languages, services and the
//! interface definitions they expose), the validated [`GenerationRequest`],
//! configuration, and the error taxonomy shared by every pipeline stage.

mod config;
mod error;
mod language;
mod request;
mod service;
mod stage;

pub use config::{CompilerConfig, Config, DEFAULT_CONFIG_FILE, SourceConfig};
pub use error::{Error, Result};
pub use language::{INTERFACE_EXTENSION, Language, LanguageProfile, OutputFlag};
pub use request::{ALL_SERVICES, GenerationRequest};
pub use service::{Service, Visibility};
pub use stage::Stage;
