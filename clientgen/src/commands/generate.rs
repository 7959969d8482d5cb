use std::path::PathBuf;

use clap::Args;
use clientgen_core::{Config, GenerationRequest, Visibility};
use eyre::{Context, Result, eyre};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Language of the generated code: go, ruby, python, javascript
    #[arg(short, long, required = true)]
    pub language: Option<String>,

    /// Service to generate code for (generating for all services is not supported)
    #[arg(short, long, default_value = clientgen_core::ALL_SERVICES)]
    pub service: String,

    /// Directory to copy generated code into, relative to the current directory
    #[arg(short, long, required = true)]
    pub output: Option<PathBuf>,

    /// Use the private protobuf instead of the public one
    #[arg(short, long)]
    pub private: bool,

    /// Path to a config file (defaults to ./clientgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let language = self
            .language
            .as_deref()
            .ok_or_else(|| eyre!("--language is required"))?;
        let output = self
            .output
            .as_deref()
            .ok_or_else(|| eyre!("--output is required"))?;

        // Every gate runs before any config file, network or disk access.
        let request = GenerationRequest::new(
            &self.service,
            language,
            Visibility::from_private(self.private),
            output,
        )
        .unwrap_or_exit();

        let cwd = std::env::current_dir().wrap_err("Cannot locate current working directory")?;
        let config = Config::load(self.config.as_deref(), &cwd).unwrap_or_exit();

        let pipeline = ops::pipeline(&config, &cwd);
        let report = ops::generate(&pipeline, &request).unwrap_or_exit();

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
