//! Retrieving a service's source tree.

use std::path::{Path, PathBuf};

use clientgen_core::{Error, Result, Service, SourceConfig, Stage};
use tracing::{debug, info};

use crate::process::run_captured;

/// Retrieves a service's source tree into a workspace.
///
/// On success the returned directory contains `proto/public/` and/or
/// `proto/private/`. On failure nothing is promised about partial content.
pub trait SourceFetcher {
    fn fetch(&self, service: Service, workspace_root: &Path) -> Result<PathBuf>;
}

/// Clones service repositories with the `git` client.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    source: SourceConfig,
}

impl GitFetcher {
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            source: config.clone(),
        }
    }

    fn clone_args(remote: &str, dest: &Path) -> Vec<String> {
        vec![
            "clone".to_string(),
            "--depth".to_string(),
            "1".to_string(),
            "--quiet".to_string(),
            remote.to_string(),
            dest.display().to_string(),
        ]
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new(&SourceConfig::default())
    }
}

impl SourceFetcher for GitFetcher {
    fn fetch(&self, service: Service, workspace_root: &Path) -> Result<PathBuf> {
        let dest = workspace_root.join(service.as_str());
        let remote = self.source.remote_for(service);
        info!(%service, %remote, "cloning service");

        let out = run_captured(
            Stage::Fetch,
            &self.source.git,
            &Self::clone_args(&remote, &dest),
            None,
            self.source.timeout(),
        )?;

        if !out.success() {
            return Err(Box::new(Error::FetchFailed {
                service,
                status: out.status_text(),
                detail: out.stderr.trim().to_string(),
                remote,
            }));
        }

        let proto = dest.join("proto");
        if !proto.is_dir() {
            return Err(Box::new(Error::FetchIncomplete {
                service,
                path: proto,
            }));
        }

        debug!(path = %dest.display(), "cloned service");
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_args() {
        let args = GitFetcher::clone_args(
            "git@github.com:asmahood/catalog.git",
            Path::new("/tmp/ws/catalog"),
        );
        insta::assert_snapshot!(
            args.join(" "),
            @"clone --depth 1 --quiet git@github.com:asmahood/catalog.git /tmp/ws/catalog"
        );
    }

    #[test]
    fn test_missing_git_binary() {
        let temp = tempfile::TempDir::new().unwrap();
        let fetcher = GitFetcher::new(&SourceConfig {
            git: "definitely-not-git".to_string(),
            ..SourceConfig::default()
        });

        let err = fetcher.fetch(Service::Catalog, temp.path()).unwrap_err();
        assert!(matches!(*err, Error::Spawn { stage: Stage::Fetch, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_clone() {
        let temp = tempfile::TempDir::new().unwrap();
        let fetcher = GitFetcher::new(&SourceConfig {
            git: "false".to_string(),
            ..SourceConfig::default()
        });

        let err = fetcher.fetch(Service::Catalog, temp.path()).unwrap_err();
        assert!(matches!(
            *err,
            Error::FetchFailed { service: Service::Catalog, ref remote, .. }
                if remote == "git@github.com:asmahood/catalog.git"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_clone_without_proto_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        // `true` succeeds without creating anything.
        let fetcher = GitFetcher::new(&SourceConfig {
            git: "true".to_string(),
            ..SourceConfig::default()
        });

        let err = fetcher.fetch(Service::Catalog, temp.path()).unwrap_err();
        assert!(matches!(*err, Error::FetchIncomplete { .. }));
    }
}
