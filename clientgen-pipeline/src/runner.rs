//! Pipeline orchestrator.

use std::path::PathBuf;

use clientgen_core::{Error, GenerationRequest, Language, Result, Service, Stage, Visibility};
use tracing::{debug, info, info_span, warn};

use crate::{
    Compiler, Plugin, SourceFetcher, Workspace, collect::collect_artifacts,
    extract::extract_interface,
};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub service: Service,
    pub language: Language,
    pub visibility: Visibility,
    /// Resolved output directory.
    pub output: PathBuf,
    /// Names of the files copied to `output`, sorted.
    pub artifacts: Vec<String>,
}

/// The generation pipeline.
///
/// Runs workspace → fetch → extract → generate → collect for one validated
/// request, calling plugin hooks around each stage. The workspace is removed
/// on every exit path.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new(GitFetcher::new(&config.source), Protoc::new(&config.compiler));
/// let report = pipeline.run(&request)?;
/// ```
pub struct Pipeline {
    fetcher: Box<dyn SourceFetcher>,
    compiler: Box<dyn Compiler>,
    plugins: Vec<Box<dyn Plugin>>,
    workspace_root: Option<PathBuf>,
    working_dir: Option<PathBuf>,
}

impl Pipeline {
    pub fn new(fetcher: impl SourceFetcher + 'static, compiler: impl Compiler + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            compiler: Box::new(compiler),
            plugins: Vec::new(),
            workspace_root: None,
            working_dir: None,
        }
    }

    /// Add a plugin to receive stage lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Allocate workspaces under `root` instead of the system temp directory.
    pub fn workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// Resolve relative output paths against `dir` instead of the process cwd.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Names of the registered plugins, in hook order.
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Run the pipeline for one request.
    ///
    /// # Errors
    ///
    /// Returns the first stage error. If teardown also fails after a stage
    /// error, the teardown error is logged and the stage error returned.
    pub fn run(&self, request: &GenerationRequest) -> Result<GenerationReport> {
        let _span = info_span!(
            "generate",
            service = %request.service(),
            language = %request.language()
        )
        .entered();

        if !self.plugins.is_empty() {
            debug!(plugins = ?self.plugin_names(), "registered plugins");
        }

        let output = self.resolve_output(request)?;
        let workspace = self.stage(Stage::Workspace, request, || match &self.workspace_root {
            Some(root) => Workspace::create_in(root),
            None => Workspace::create(),
        })?;
        info!(path = %workspace.root().display(), "created temporary directory");

        let result = self.run_in(&workspace, request, &output);
        let teardown = workspace.destroy();

        match (result, teardown) {
            (Ok(artifacts), Ok(())) => Ok(GenerationReport {
                service: request.service(),
                language: request.language(),
                visibility: request.visibility(),
                output,
                artifacts,
            }),
            (Ok(_), Err(e)) | (Err(e), Ok(())) => Err(e),
            (Err(e), Err(teardown)) => {
                warn!("{}", teardown);
                Err(e)
            }
        }
    }

    fn run_in(
        &self,
        workspace: &Workspace,
        request: &GenerationRequest,
        output: &std::path::Path,
    ) -> Result<Vec<String>> {
        let service = request.service();

        let source_dir = self.stage(Stage::Fetch, request, || {
            self.fetcher.fetch(service, workspace.root())
        })?;

        self.stage(Stage::Extract, request, || {
            extract_interface(service, &source_dir, workspace.staging(), request.visibility())
        })?;

        self.stage(Stage::Generate, request, || {
            self.compiler
                .generate(request.language(), service, workspace.staging())
        })?;

        self.stage(Stage::Collect, request, || {
            collect_artifacts(workspace.staging(), output)
        })
    }

    /// Run a single stage with plugin hooks.
    fn stage<T>(
        &self,
        stage: Stage,
        request: &GenerationRequest,
        run: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        for plugin in &self.plugins {
            plugin.on_before_stage(stage, request).inspect_err(|e| {
                warn!(plugin = plugin.name(), %stage, "hook aborted the run: {}", e);
            })?;
        }

        let _span = info_span!("stage", name = stage.name()).entered();
        debug!("{}", stage.description());
        let value = run()?;

        for plugin in &self.plugins {
            plugin.on_after_stage(stage, request).inspect_err(|e| {
                warn!(plugin = plugin.name(), %stage, "hook aborted the run: {}", e);
            })?;
        }

        Ok(value)
    }

    fn resolve_output(&self, request: &GenerationRequest) -> Result<PathBuf> {
        match &self.working_dir {
            Some(dir) => Ok(request.output_in(dir)),
            None => output_in_current_dir(request, std::env::current_dir()),
        }
    }
}

/// Resolve a relative output against `cwd`, which is only consulted when needed.
fn output_in_current_dir(
    request: &GenerationRequest,
    cwd: std::io::Result<PathBuf>,
) -> Result<PathBuf> {
    if request.output().is_absolute() {
        return Ok(request.output().to_path_buf());
    }
    let cwd = cwd.map_err(|source| Box::new(Error::WorkingDir { source }))?;
    Ok(request.output_in(&cwd))
}
