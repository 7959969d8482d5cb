//! Generate operation - one service, one language.

use std::path::Path;

use clientgen_core::{Config, GenerationRequest, Result};
use clientgen_pipeline::{GitFetcher, Pipeline, Protoc};

use crate::reports::GenerateReport;

/// Build the production pipeline: git for fetching, protoc for generating.
pub fn pipeline(config: &Config, cwd: &Path) -> Pipeline {
    Pipeline::new(GitFetcher::new(&config.source), Protoc::new(&config.compiler)).working_dir(cwd)
}

/// Execute the generate operation.
///
/// Runs the pipeline for the request and summarizes what was written.
pub fn generate(pipeline: &Pipeline, request: &GenerationRequest) -> Result<GenerateReport> {
    let report = pipeline.run(request)?;

    Ok(GenerateReport {
        service: report.service.to_string(),
        language: report.language.to_string(),
        visibility: report.visibility.to_string(),
        output_dir: report.output,
        artifacts: report.artifacts,
    })
}
