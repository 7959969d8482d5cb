//! Exporting generated files to the caller's output directory.

use std::path::Path;

use clientgen_core::{Error, Result, Stage};
use tracing::{debug, info};

use crate::extract::is_interface_file;

/// Copy every generated file in `staging` into `output`, skipping definitions.
///
/// `output` must already exist; it is never created. Existing files with the
/// same name are overwritten. Returns the copied file names, sorted.
pub fn collect_artifacts(staging: &Path, output: &Path) -> Result<Vec<String>> {
    if !output.exists() {
        return Err(Box::new(Error::OutputMissing {
            path: output.to_path_buf(),
        }));
    }
    if !output.is_dir() {
        return Err(Box::new(Error::OutputNotDirectory {
            path: output.to_path_buf(),
        }));
    }

    let entries =
        std::fs::read_dir(staging).map_err(|e| Error::read_dir(Stage::Collect, staging, e))?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::read_dir(Stage::Collect, staging, e))?;
        let path = entry.path();
        if is_interface_file(&path) || !path.is_file() {
            debug!(path = %path.display(), "not collecting");
            continue;
        }
        sources.push(path);
    }
    sources.sort();

    let mut collected = Vec::with_capacity(sources.len());
    for src in sources {
        let Some(name) = src.file_name() else {
            continue;
        };
        let dest = output.join(name);
        std::fs::copy(&src, &dest).map_err(|e| Error::copy_file(Stage::Collect, &src, &dest, e))?;
        collected.push(name.to_string_lossy().into_owned());
    }

    info!(count = collected.len(), output = %output.display(), "collected generated files");
    Ok(collected)
}
