//! Services command report data structures.

use serde::Serialize;

use super::output::{Output, Report};

/// The language and service support tables.
#[derive(Debug, Serialize)]
pub struct ServicesReport {
    /// Supported target languages.
    pub languages: Vec<String>,
    /// One row per known service.
    pub services: Vec<ServiceRow>,
}

/// Which protobuf definitions a service exposes.
#[derive(Debug, Serialize)]
pub struct ServiceRow {
    pub name: String,
    pub public: bool,
    pub private: bool,
}

impl ServiceRow {
    fn visibilities(&self) -> String {
        let mut parts = Vec::new();
        if self.public {
            parts.push("public");
        }
        if self.private {
            parts.push("private");
        }
        parts.join(", ")
    }
}

impl Report for ServicesReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value("Languages", &self.languages.join(", "));
        out.newline();

        out.section(&format!("Services ({})", self.services.len()));
        let width = self.services.iter().map(|s| s.name.len()).max().unwrap_or(0);
        for row in &self.services {
            out.list_item(&format!(
                "{:<width$}  {}",
                row.name,
                row.visibilities(),
                width = width
            ));
        }
    }
}
