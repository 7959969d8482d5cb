//! Staging a service's interface definition under its canonical name.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use clientgen_core::{
    Error, INTERFACE_EXTENSION, LanguageProfile, Result, Service, Stage, Visibility,
};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Directory inside a service's source tree holding the definition for `visibility`.
pub fn interface_dir(source_dir: &Path, visibility: Visibility) -> PathBuf {
    source_dir.join("proto").join(visibility.as_str())
}

/// Returns true if `path` has the interface definition extension.
pub fn is_interface_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == INTERFACE_EXTENSION)
}

/// Copy the service's single definition file into `staging/<service>.proto`.
///
/// Only regular files with the definition extension are candidates. Zero or
/// several candidates abort the run. The canonical file is written under a
/// temporary name and renamed into place, so it is either complete or absent.
pub fn extract_interface(
    service: Service,
    source_dir: &Path,
    staging: &Path,
    visibility: Visibility,
) -> Result<PathBuf> {
    let dir = interface_dir(source_dir, visibility);
    let mut candidates = find_candidates(&dir)?;

    let src = match candidates.len() {
        0 => return Err(Box::new(Error::NoInterface { path: dir })),
        1 => candidates.remove(0),
        _ => {
            return Err(Box::new(Error::AmbiguousInterface {
                path: dir,
                candidates: candidates
                    .iter()
                    .filter_map(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .collect(),
            }));
        }
    };

    let dest = LanguageProfile::input_file(service.as_str(), staging);
    copy_atomic(&src, &dest)?;

    info!(
        from = %src.display(),
        to = %dest.display(),
        "staged {} definition",
        visibility
    );
    Ok(dest)
}

/// Definition files in `dir`, sorted by name.
fn find_candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::read_dir(Stage::Extract, dir, e))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::read_dir(Stage::Extract, dir, e))?;
        let path = entry.path();
        if path.is_file() && is_interface_file(&path) {
            candidates.push(path);
        } else {
            debug!(path = %path.display(), "ignoring non-definition entry");
        }
    }
    candidates.sort();
    Ok(candidates)
}

fn copy_atomic(src: &Path, dest: &Path) -> Result<()> {
    let err = |e| Error::copy_file(Stage::Extract, src, dest, e);
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));

    let mut input = File::open(src).map_err(err)?;
    let mut tmp = NamedTempFile::new_in(parent).map_err(err)?;
    io::copy(&mut input, tmp.as_file_mut()).map_err(err)?;
    tmp.as_file().sync_all().map_err(err)?;
    tmp.persist(dest).map_err(|e| err(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Fixture {
        _temp: TempDir,
        source: PathBuf,
        staging: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let source = temp.path().join("catalog");
            let staging = temp.path().join("proto");
            fs::create_dir_all(source.join("proto/public")).unwrap();
            fs::create_dir_all(source.join("proto/private")).unwrap();
            fs::create_dir(&staging).unwrap();
            Self {
                _temp: temp,
                source,
                staging,
            }
        }

        fn write(&self, visibility: Visibility, name: &str, content: &str) {
            fs::write(interface_dir(&self.source, visibility).join(name), content).unwrap();
        }

        fn staged(&self) -> Vec<String> {
            let mut names: Vec<String> = fs::read_dir(&self.staging)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            names
        }

        fn extract(&self, visibility: Visibility) -> Result<PathBuf> {
            extract_interface(Service::Catalog, &self.source, &self.staging, visibility)
        }
    }

    #[test]
    fn test_copies_under_canonical_name() {
        let fx = Fixture::new();
        fx.write(Visibility::Public, "service.proto", "syntax = \"proto3\";\n");

        let dest = fx.extract(Visibility::Public).unwrap();

        assert_eq!(dest, fx.staging.join("catalog.proto"));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "syntax = \"proto3\";\n");
        assert_eq!(fx.staged(), vec!["catalog.proto"]);
    }

    #[test]
    fn test_ignores_non_definition_files() {
        let fx = Fixture::new();
        fx.write(Visibility::Public, "README.md", "# Catalog");
        fx.write(Visibility::Public, "service.proto.bak", "old");
        fx.write(Visibility::Public, "service.proto", "new");
        fs::create_dir(interface_dir(&fx.source, Visibility::Public).join("vendor.proto")).unwrap();

        fx.extract(Visibility::Public).unwrap();

        assert_eq!(fx.staged(), vec!["catalog.proto"]);
        assert_eq!(fs::read_to_string(fx.staging.join("catalog.proto")).unwrap(), "new");
    }

    #[test]
    fn test_selects_private_directory() {
        let fx = Fixture::new();
        fx.write(Visibility::Public, "public.proto", "public");
        fx.write(Visibility::Private, "internal.proto", "private");

        fx.extract(Visibility::Private).unwrap();

        assert_eq!(
            fs::read_to_string(fx.staging.join("catalog.proto")).unwrap(),
            "private"
        );
    }

    #[test]
    fn test_no_definition_is_an_error() {
        let fx = Fixture::new();
        fx.write(Visibility::Public, "README.md", "# Catalog");

        let err = fx.extract(Visibility::Public).unwrap_err();
        assert!(matches!(*err, Error::NoInterface { .. }));
        assert!(fx.staged().is_empty());
    }

    #[test]
    fn test_multiple_definitions_are_ambiguous() {
        let fx = Fixture::new();
        fx.write(Visibility::Public, "b.proto", "b");
        fx.write(Visibility::Public, "a.proto", "a");

        let err = fx.extract(Visibility::Public).unwrap_err();
        match *err {
            Error::AmbiguousInterface { candidates, .. } => {
                assert_eq!(candidates, vec!["a.proto", "b.proto"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(fx.staged().is_empty());
    }

    #[test]
    fn test_missing_visibility_directory() {
        let fx = Fixture::new();
        fs::remove_dir(interface_dir(&fx.source, Visibility::Private)).unwrap();

        let err = fx.extract(Visibility::Private).unwrap_err();
        assert!(matches!(*err, Error::ReadDir { stage: Stage::Extract, .. }));
    }

    #[test]
    fn test_overwrites_existing_canonical_file() {
        let fx = Fixture::new();
        fs::write(fx.staging.join("catalog.proto"), "stale").unwrap();
        fx.write(Visibility::Public, "service.proto", "fresh");

        fx.extract(Visibility::Public).unwrap();

        assert_eq!(fs::read_to_string(fx.staging.join("catalog.proto")).unwrap(), "fresh");
    }
}
