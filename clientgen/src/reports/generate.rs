//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from one generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Service the code was generated for.
    pub service: String,
    /// Target language.
    pub language: String,
    /// Which definition was used ("public" or "private").
    pub visibility: String,
    /// Resolved output directory.
    pub output_dir: PathBuf,
    /// Files copied to the output directory.
    pub artifacts: Vec<String>,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!(
            "Generated {} code for {} ({})",
            self.language, self.service, self.visibility
        ));
        out.key_value("Output", &self.output_dir.display().to_string());

        if self.artifacts.is_empty() {
            out.warning("the generator produced no files");
            return;
        }

        out.newline();
        out.section(&format!("Files ({})", self.artifacts.len()));
        for artifact in &self.artifacts {
            out.added_item(artifact);
        }
    }
}
