//! Ephemeral staging area for one generation run.

use std::path::{Path, PathBuf};

use clientgen_core::{Error, Result};
use tempfile::TempDir;
use tracing::{debug, warn};

/// Prefix of every workspace directory name.
pub const WORKSPACE_PREFIX: &str = "client-generation-";

/// Name of the staging subdirectory holding the canonical definition and
/// the compiler's output.
pub const STAGING_DIR: &str = "proto";

/// A uniquely named temporary directory owned by exactly one run.
///
/// The tree is removed when the workspace is dropped, so every exit path of
/// a run releases it. Call [`Workspace::destroy`] to observe removal errors.
#[derive(Debug)]
pub struct Workspace {
    dir: Option<TempDir>,
    root: PathBuf,
    staging: PathBuf,
}

impl Workspace {
    /// Create a workspace under the system temporary directory.
    pub fn create() -> Result<Self> {
        Self::create_in(std::env::temp_dir())
    }

    /// Create a workspace under `parent`.
    pub fn create_in(parent: impl AsRef<Path>) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(parent)
            .map_err(|source| Box::new(Error::CreateWorkspace { source }))?;

        let root = dir.path().to_path_buf();
        let staging = root.join(STAGING_DIR);

        // On failure `dir` drops here and the partial tree goes with it.
        std::fs::create_dir(&staging)
            .map_err(|source| Box::new(Error::CreateWorkspace { source }))?;

        debug!(path = %root.display(), "created workspace");

        Ok(Self {
            dir: Some(dir),
            root,
            staging,
        })
    }

    /// Root of the workspace; service sources are cloned beneath it.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Staging directory for the canonical definition and generated files.
    pub fn staging(&self) -> &Path {
        &self.staging
    }

    /// Remove the whole tree now, reporting any removal error.
    ///
    /// Removing a tree that is already gone succeeds.
    pub fn destroy(mut self) -> Result<()> {
        match self.dir.take() {
            Some(dir) => remove(dir),
            None => Ok(()),
        }
    }
}

fn remove(dir: TempDir) -> Result<()> {
    let path = dir.path().to_path_buf();
    match dir.close() {
        Ok(()) => {
            debug!(path = %path.display(), "removed workspace");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Box::new(Error::DestroyWorkspace { path, source })),
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(e) = remove(dir) {
                warn!("{}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_create_layout() {
        let parent = TempDir::new().unwrap();
        let ws = Workspace::create_in(parent.path()).unwrap();

        assert!(ws.root().is_dir());
        assert!(ws.staging().is_dir());
        assert_eq!(ws.staging(), ws.root().join(STAGING_DIR));
        let name = ws.root().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with(WORKSPACE_PREFIX));
    }

    #[test]
    fn test_names_are_unique() {
        let parent = TempDir::new().unwrap();
        let a = Workspace::create_in(parent.path()).unwrap();
        let b = Workspace::create_in(parent.path()).unwrap();
        assert_ne!(a.root(), b.root());
    }

    #[test]
    fn test_destroy_removes_tree() {
        let parent = TempDir::new().unwrap();
        let ws = Workspace::create_in(parent.path()).unwrap();
        std::fs::write(ws.staging().join("catalog.proto"), "syntax = \"proto3\";").unwrap();

        ws.destroy().unwrap();
        assert_eq!(entries(parent.path()), 0);
    }

    #[test]
    fn test_drop_removes_tree() {
        let parent = TempDir::new().unwrap();
        {
            let _ws = Workspace::create_in(parent.path()).unwrap();
            assert_eq!(entries(parent.path()), 1);
        }
        assert_eq!(entries(parent.path()), 0);
    }

    #[test]
    fn test_destroy_already_removed() {
        let parent = TempDir::new().unwrap();
        let ws = Workspace::create_in(parent.path()).unwrap();
        std::fs::remove_dir_all(ws.root()).unwrap();

        assert!(ws.destroy().is_ok());
    }

    #[test]
    fn test_create_in_missing_parent() {
        let parent = TempDir::new().unwrap();
        let err = Workspace::create_in(parent.path().join("missing")).unwrap_err();
        assert!(matches!(*err, Error::CreateWorkspace { .. }));
    }
}
