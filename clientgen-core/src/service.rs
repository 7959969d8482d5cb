//! Services and the interface definitions they expose.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Whether the public or the internal-only interface definition is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    /// Both visibilities, public first.
    pub const ALL: [Visibility; 2] = [Visibility::Public, Visibility::Private];

    /// Build a visibility from the `--private` flag.
    pub fn from_private(private: bool) -> Self {
        if private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }

    /// Directory name under `proto/` in a service's source tree.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Services with a protobuf interface definition in their repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Audit,
    Authorization,
    Catalog,
    Category,
    Dataspec,
    Exports,
    Grants,
    Jabba,
    Organizations,
    Parser,
    Query,
    References,
    Search,
    Sources,
    Taskrunner,
    Uploads,
    Warehouses,
}

impl Service {
    /// All known services, alphabetically.
    pub const ALL: [Service; 17] = [
        Service::Audit,
        Service::Authorization,
        Service::Catalog,
        Service::Category,
        Service::Dataspec,
        Service::Exports,
        Service::Grants,
        Service::Jabba,
        Service::Organizations,
        Service::Parser,
        Service::Query,
        Service::References,
        Service::Search,
        Service::Sources,
        Service::Taskrunner,
        Service::Uploads,
        Service::Warehouses,
    ];

    /// Returns the service identifier, which is also its repository name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Audit => "audit",
            Service::Authorization => "authorization",
            Service::Catalog => "catalog",
            Service::Category => "category",
            Service::Dataspec => "dataspec",
            Service::Exports => "exports",
            Service::Grants => "grants",
            Service::Jabba => "jabba",
            Service::Organizations => "organizations",
            Service::Parser => "parser",
            Service::Query => "query",
            Service::References => "references",
            Service::Search => "search",
            Service::Sources => "sources",
            Service::Taskrunner => "taskrunner",
            Service::Uploads => "uploads",
            Service::Warehouses => "warehouses",
        }
    }

    /// Returns true if this service has a public protobuf defined.
    pub fn has_public(&self) -> bool {
        matches!(
            self,
            Service::Authorization
                | Service::Catalog
                | Service::Category
                | Service::Dataspec
                | Service::Exports
                | Service::Grants
                | Service::Organizations
                | Service::Query
                | Service::References
                | Service::Search
                | Service::Sources
                | Service::Uploads
                | Service::Warehouses
        )
    }

    /// Returns true if this service has a private protobuf defined.
    pub fn has_private(&self) -> bool {
        matches!(
            self,
            Service::Audit
                | Service::Jabba
                | Service::Parser
                | Service::Catalog
                | Service::Category
                | Service::Exports
                | Service::Grants
                | Service::Organizations
                | Service::Query
                | Service::References
                | Service::Sources
                | Service::Warehouses
                | Service::Taskrunner
        )
    }

    /// Returns true if this service exposes the given interface definition.
    pub fn supports(&self, visibility: Visibility) -> bool {
        match visibility {
            Visibility::Public => self.has_public(),
            Visibility::Private => self.has_private(),
        }
    }

    /// The visibilities this service supports.
    pub fn visibilities(&self) -> Vec<Visibility> {
        Visibility::ALL
            .into_iter()
            .filter(|v| self.supports(*v))
            .collect()
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Service {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_lowercase();
        Service::ALL
            .into_iter()
            .find(|service| service.as_str() == name)
            .ok_or_else(|| format!("unknown service '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Service::from_str("catalog").unwrap(), Service::Catalog);
        assert_eq!(Service::from_str("Jabba").unwrap(), Service::Jabba);
        assert!(Service::from_str("all").is_err());
        assert!(Service::from_str("billing").is_err());
    }

    #[test]
    fn test_public_only_services() {
        for service in [
            Service::Authorization,
            Service::Dataspec,
            Service::Search,
            Service::Uploads,
        ] {
            assert!(service.supports(Visibility::Public), "{service}");
            assert!(!service.supports(Visibility::Private), "{service}");
        }
    }

    #[test]
    fn test_private_only_services() {
        for service in [
            Service::Audit,
            Service::Jabba,
            Service::Parser,
            Service::Taskrunner,
        ] {
            assert!(!service.supports(Visibility::Public), "{service}");
            assert!(service.supports(Visibility::Private), "{service}");
        }
    }

    #[test]
    fn test_every_service_exposes_something() {
        for service in Service::ALL {
            assert!(!service.visibilities().is_empty(), "{service}");
        }
    }

    #[test]
    fn test_both_visibilities() {
        assert_eq!(
            Service::Catalog.visibilities(),
            vec![Visibility::Public, Visibility::Private]
        );
        assert_eq!(Service::Jabba.visibilities(), vec![Visibility::Private]);
    }

    #[test]
    fn test_visibility_from_private() {
        assert_eq!(Visibility::from_private(false), Visibility::Public);
        assert_eq!(Visibility::from_private(true), Visibility::Private);
        assert_eq!(Visibility::default(), Visibility::Public);
    }
}
