//! Test doubles for the fetch and generate stages.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use clientgen_core::{Error, Language, Result, Service, Stage, Visibility};

use crate::{Compiler, SourceFetcher};

/// Builds a fake service checkout instead of cloning.
#[derive(Debug, Clone, Default)]
pub struct FakeFetcher {
    files: Vec<(Visibility, String, String)>,
    fail: Option<String>,
    calls: Arc<Mutex<Vec<Service>>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file under `proto/public/`.
    pub fn public(self, name: &str, content: &str) -> Self {
        self.file(Visibility::Public, name, content)
    }

    /// Add a file under `proto/private/`.
    pub fn private(self, name: &str, content: &str) -> Self {
        self.file(Visibility::Private, name, content)
    }

    pub fn file(mut self, visibility: Visibility, name: &str, content: &str) -> Self {
        self.files
            .push((visibility, name.to_string(), content.to_string()));
        self
    }

    /// Make every fetch fail with `detail`.
    pub fn failing(mut self, detail: &str) -> Self {
        self.fail = Some(detail.to_string());
        self
    }

    /// Services fetched so far, shared across clones.
    pub fn calls(&self) -> Arc<Mutex<Vec<Service>>> {
        self.calls.clone()
    }
}

impl SourceFetcher for FakeFetcher {
    fn fetch(&self, service: Service, workspace_root: &Path) -> Result<PathBuf> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(service);
        }

        let dest = workspace_root.join(service.as_str());
        if let Some(detail) = &self.fail {
            return Err(Box::new(Error::FetchFailed {
                service,
                remote: format!("fake://{}", service),
                status: "exit code 128".to_string(),
                detail: detail.clone(),
            }));
        }

        for visibility in Visibility::ALL {
            write(&dest.join("proto").join(visibility.as_str()), None)?;
        }
        for (visibility, name, content) in &self.files {
            let dir = dest.join("proto").join(visibility.as_str());
            write(&dir.join(name), Some(content))?;
        }
        Ok(dest)
    }
}

/// Writes canned output files into staging instead of running protoc.
#[derive(Debug, Clone, Default)]
pub struct FakeCompiler {
    outputs: Vec<(String, Vec<u8>)>,
    fail: Option<String>,
    calls: Arc<Mutex<Vec<(Language, Service)>>>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file the compiler "generates".
    pub fn output(mut self, name: &str, content: impl AsRef<[u8]>) -> Self {
        self.outputs
            .push((name.to_string(), content.as_ref().to_vec()));
        self
    }

    /// Make every run exit non-zero with `stderr`.
    pub fn failing(mut self, stderr: &str) -> Self {
        self.fail = Some(stderr.to_string());
        self
    }

    /// Invocations so far, shared across clones.
    pub fn calls(&self) -> Arc<Mutex<Vec<(Language, Service)>>> {
        self.calls.clone()
    }
}

impl Compiler for FakeCompiler {
    fn generate(&self, language: Language, service: Service, staging: &Path) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((language, service));
        }

        if let Some(stderr) = &self.fail {
            return Err(Box::new(Error::CompilerFailed {
                language,
                status: "exit code 1".to_string(),
                stderr: stderr.clone(),
            }));
        }

        for (name, content) in &self.outputs {
            let path = staging.join(name);
            fs::write(&path, content)
                .map_err(|e| Error::copy_file(Stage::Generate, &path, &path, e))?;
        }
        Ok(())
    }
}

/// Create `path` as a directory (`None`) or a file with `content`.
fn write(path: &Path, content: Option<&String>) -> Result<()> {
    let result = match content {
        None => fs::create_dir_all(path),
        Some(content) => fs::write(path, content),
    };
    result.map_err(|e| Error::copy_file(Stage::Fetch, path, path, e))
}
