//! Services operation - the static support tables.

use clientgen_core::{Language, Service, Visibility};

use crate::reports::{ServiceRow, ServicesReport};

/// Execute the services operation.
pub fn services() -> ServicesReport {
    ServicesReport {
        languages: Language::ALL.iter().map(|l| l.to_string()).collect(),
        services: Service::ALL
            .iter()
            .map(|service| ServiceRow {
                name: service.to_string(),
                public: service.supports(Visibility::Public),
                private: service.supports(Visibility::Private),
            })
            .collect(),
    }
}
