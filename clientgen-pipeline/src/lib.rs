//! Generation pipeline for protobuf clients.
//!
//! A [`Pipeline`] takes one validated
//! [`GenerationRequest`](clientgen_core::GenerationRequest) through its stages:
//!
//! - allocate a [`Workspace`] (removed again on every exit path)
//! - fetch the service source with a [`SourceFetcher`]
//! - stage the definition with [`extract_interface`]
//! - generate sources with a [`Compiler`]
//! - export them with [`collect_artifacts`]
//!
//! The fetcher and compiler are traits so the orchestration can run against
//! the fakes in `testing` without git or protoc installed.

mod collect;
mod compiler;
mod extract;
mod fetch;
mod plugin;
mod process;
mod runner;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod workspace;

pub use collect::collect_artifacts;
pub use compiler::{Compiler, Protoc};
pub use extract::{extract_interface, interface_dir, is_interface_file};
pub use fetch::{GitFetcher, SourceFetcher};
pub use plugin::Plugin;
pub use process::{Captured, run_captured};
pub use runner::{GenerationReport, Pipeline};
pub use workspace::{STAGING_DIR, WORKSPACE_PREFIX, Workspace};
