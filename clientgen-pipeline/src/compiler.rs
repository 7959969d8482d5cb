//! Invoking the external schema compiler.

use std::{path::Path, time::Duration};

use clientgen_core::{CompilerConfig, Error, Language, Result, Service, Stage};
use tracing::{info, warn};

use crate::process::run_captured;

/// Generates language sources next to the staged definition.
pub trait Compiler {
    fn generate(&self, language: Language, service: Service, staging: &Path) -> Result<()>;
}

/// Runs `protoc` with the language's plugin flags.
#[derive(Debug, Clone)]
pub struct Protoc {
    program: String,
    timeout: Option<Duration>,
}

impl Protoc {
    pub fn new(config: &CompilerConfig) -> Self {
        Self {
            program: config.program.clone(),
            timeout: config.timeout(),
        }
    }
}

impl Default for Protoc {
    fn default() -> Self {
        Self::new(&CompilerConfig::default())
    }
}

impl Compiler for Protoc {
    fn generate(&self, language: Language, service: Service, staging: &Path) -> Result<()> {
        let args = language.profile().args(service.as_str(), staging);
        let command = format!("{} {}", self.program, args.join(" "));
        info!(%language, %command, "running generator");

        let out = run_captured(
            Stage::Generate,
            &self.program,
            &args,
            Some(staging),
            self.timeout,
        )?;

        // Stream content is diagnostic only; the exit status decides.
        if !out.stdout.trim().is_empty() {
            info!("generator output:\n{}", out.stdout.trim_end());
        }
        if !out.stderr.trim().is_empty() {
            warn!("generator reported:\n{}", out.stderr.trim_end());
        }

        if !out.success() {
            return Err(Box::new(Error::CompilerFailed {
                language,
                status: out.status_text(),
                stderr: out.stderr.trim().to_string(),
            }));
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::{fs, os::unix::fs::PermissionsExt, path::PathBuf};

    use tempfile::TempDir;

    use super::*;

    /// Write an executable shell script standing in for protoc.
    fn fake_protoc(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-protoc");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn protoc(program: &Path) -> Protoc {
        Protoc::new(&CompilerConfig {
            program: program.display().to_string(),
            timeout_secs: None,
        })
    }

    #[test]
    fn test_passes_profile_arguments() {
        let bin = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let script = fake_protoc(bin.path(), "printf '%s\\n' \"$@\" > args.txt");

        protoc(&script)
            .generate(Language::Ruby, Service::Catalog, staging.path())
            .unwrap();

        let recorded = fs::read_to_string(staging.path().join("args.txt")).unwrap();
        let expected = Language::Ruby
            .profile()
            .args("catalog", staging.path())
            .join("\n");
        assert_eq!(recorded.trim_end(), expected);
    }

    #[test]
    fn test_stderr_alone_is_not_failure() {
        let bin = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let script = fake_protoc(bin.path(), "echo 'warning: unused import' >&2");

        assert!(
            protoc(&script)
                .generate(Language::Go, Service::Catalog, staging.path())
                .is_ok()
        );
    }

    #[test]
    fn test_nonzero_exit_fails_with_stderr() {
        let bin = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let script = fake_protoc(bin.path(), "echo 'catalog.proto: File not found.' >&2; exit 1");

        let err = protoc(&script)
            .generate(Language::Python, Service::Catalog, staging.path())
            .unwrap_err();
        match *err {
            Error::CompilerFailed {
                language, stderr, ..
            } => {
                assert_eq!(language, Language::Python);
                assert_eq!(stderr, "catalog.proto: File not found.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_compiler() {
        let staging = TempDir::new().unwrap();
        let err = protoc(Path::new("/nonexistent/protoc"))
            .generate(Language::Go, Service::Catalog, staging.path())
            .unwrap_err();
        assert!(matches!(*err, Error::Spawn { stage: Stage::Generate, .. }));
    }
}
