//! Validated generation requests.

use std::path::{Path, PathBuf};

use crate::{Error, Language, Result, Service, Visibility};

/// Service name the CLI uses when `--service` is omitted.
pub const ALL_SERVICES: &str = "all";

/// One fully validated (service, language, visibility) generation run.
///
/// A request can only be built through [`GenerationRequest::new`], which
/// checks every gate before any workspace is allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    service: Service,
    language: Language,
    visibility: Visibility,
    output: PathBuf,
}

impl GenerationRequest {
    /// Validate raw inputs and build a request.
    ///
    /// Gates run in order: the language must be supported, the service must
    /// be known, and the service must expose the requested definition.
    pub fn new(
        service: &str,
        language: &str,
        visibility: Visibility,
        output: impl Into<PathBuf>,
    ) -> Result<Self> {
        let language: Language = language.parse().map_err(|_| {
            Box::new(Error::UnsupportedLanguage {
                language: language.to_string(),
            })
        })?;

        let service = parse_service(service)?;

        if !service.supports(visibility) {
            return Err(Box::new(Error::MissingInterface {
                service,
                visibility,
            }));
        }

        Ok(Self {
            service,
            language,
            visibility,
            output: output.into(),
        })
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Output directory as given by the caller.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Output directory resolved against `cwd` (absolute paths are kept).
    pub fn output_in(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.output)
    }
}

fn parse_service(name: &str) -> Result<Service> {
    if name.eq_ignore_ascii_case(ALL_SERVICES) {
        return Err(Box::new(Error::AllServices));
    }
    name.parse().map_err(|_| {
        Box::new(Error::UnknownService {
            service: name.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_public_request() {
        let req = GenerationRequest::new("catalog", "go", Visibility::Public, "out").unwrap();
        assert_eq!(req.service(), Service::Catalog);
        assert_eq!(req.language(), Language::Go);
        assert_eq!(req.visibility(), Visibility::Public);
        assert_eq!(req.output(), Path::new("out"));
    }

    #[test]
    fn test_unsupported_language_is_checked_first() {
        let err = GenerationRequest::new("all", "java", Visibility::Public, "out").unwrap_err();
        assert!(matches!(*err, Error::UnsupportedLanguage { ref language } if language == "java"));
    }

    #[test]
    fn test_all_services_rejected() {
        let err = GenerationRequest::new("all", "ruby", Visibility::Public, "out").unwrap_err();
        assert!(matches!(*err, Error::AllServices));
    }

    #[test]
    fn test_unknown_service_rejected() {
        let err = GenerationRequest::new("billing", "ruby", Visibility::Public, "out").unwrap_err();
        assert!(matches!(*err, Error::UnknownService { .. }));
    }

    #[test]
    fn test_public_request_for_private_only_service() {
        let err = GenerationRequest::new("jabba", "go", Visibility::Public, "out").unwrap_err();
        assert!(matches!(
            *err,
            Error::MissingInterface {
                service: Service::Jabba,
                visibility: Visibility::Public
            }
        ));
    }

    #[test]
    fn test_private_request_for_public_only_service() {
        let err =
            GenerationRequest::new("search", "python", Visibility::Private, "out").unwrap_err();
        assert!(matches!(
            *err,
            Error::MissingInterface {
                service: Service::Search,
                visibility: Visibility::Private
            }
        ));
    }

    #[test]
    fn test_service_with_both_accepts_either() {
        for visibility in Visibility::ALL {
            assert!(GenerationRequest::new("grants", "js", visibility, "out").is_ok());
        }
    }

    #[test]
    fn test_output_resolution() {
        let req =
            GenerationRequest::new("catalog", "go", Visibility::Public, "rpc/catalog").unwrap();
        assert_eq!(
            req.output_in(Path::new("/work")),
            PathBuf::from("/work/rpc/catalog")
        );

        let req = GenerationRequest::new("catalog", "go", Visibility::Public, "/abs/out").unwrap();
        assert_eq!(req.output_in(Path::new("/work")), PathBuf::from("/abs/out"));
    }
}
