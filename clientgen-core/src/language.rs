//! Target languages and their compiler invocation profiles.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// File extension of interface definition files, without the dot.
pub const INTERFACE_EXTENSION: &str = "proto";

/// Supported target languages for client generation.
///
/// Every variant has a [`LanguageProfile`], so a language that parses is a
/// language the compiler can be invoked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Go (protoc-gen-go + protoc-gen-twirp)
    Go,
    /// Ruby (ruby + twirp_ruby)
    Ruby,
    /// Python (python + twirpy)
    Python,
    /// JavaScript (commonjs + twirp_js)
    Javascript,
}

impl Language {
    /// All supported languages, in display order.
    pub const ALL: [Language; 4] = [
        Language::Go,
        Language::Ruby,
        Language::Python,
        Language::Javascript,
    ];

    /// Returns the language identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Ruby => "ruby",
            Language::Python => "python",
            Language::Javascript => "javascript",
        }
    }

    /// Returns true if `lang` names a supported language.
    pub fn is_supported(lang: &str) -> bool {
        lang.parse::<Language>().is_ok()
    }

    /// Get the compiler profile for this language.
    pub fn profile(&self) -> LanguageProfile {
        match self {
            Language::Go => LanguageProfile {
                language: *self,
                outputs: GO_OUTPUTS,
                proto_path_first: false,
            },
            Language::Ruby => LanguageProfile {
                language: *self,
                outputs: RUBY_OUTPUTS,
                proto_path_first: true,
            },
            Language::Python => LanguageProfile {
                language: *self,
                outputs: PYTHON_OUTPUTS,
                proto_path_first: true,
            },
            Language::Javascript => LanguageProfile {
                language: *self,
                outputs: JAVASCRIPT_OUTPUTS,
                proto_path_first: true,
            },
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "go" | "golang" => Ok(Language::Go),
            "ruby" | "rb" => Ok(Language::Ruby),
            "python" | "py" => Ok(Language::Python),
            "javascript" | "js" => Ok(Language::Javascript),
            _ => Err(format!(
                "unknown language '{}', expected one of: go, ruby, python, javascript",
                s
            )),
        }
    }
}

/// A plugin output flag passed to the schema compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFlag {
    /// Flag name without leading dashes (e.g., "go_out").
    pub name: &'static str,
    /// Options placed before the output directory (e.g., "paths=source_relative:").
    pub options: &'static str,
}

const GO_OUTPUTS: &[OutputFlag] = &[
    OutputFlag::new("twirp_out", "paths=source_relative:"),
    OutputFlag::new("go_out", "paths=source_relative:"),
];

const RUBY_OUTPUTS: &[OutputFlag] = &[
    OutputFlag::new("twirp_ruby_out", ""),
    OutputFlag::new("ruby_out", ""),
];

const PYTHON_OUTPUTS: &[OutputFlag] = &[
    OutputFlag::new("twirpy_out", ""),
    OutputFlag::new("python_out", ""),
];

const JAVASCRIPT_OUTPUTS: &[OutputFlag] = &[
    OutputFlag::new("twirp_js_out", ""),
    OutputFlag::new("js_out", "import_style=commonjs,binary:"),
];

impl OutputFlag {
    const fn new(name: &'static str, options: &'static str) -> Self {
        Self { name, options }
    }

    fn render(&self, dir: &Path) -> String {
        format!("--{}={}{}", self.name, self.options, dir.display())
    }
}

/// Argument template used to invoke the schema compiler for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
    language: Language,
    outputs: &'static [OutputFlag],
    /// Whether `--proto_path` precedes the output flags.
    proto_path_first: bool,
}

impl LanguageProfile {
    /// The language this profile generates.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Plugin output flags, in invocation order.
    pub fn outputs(&self) -> &'static [OutputFlag] {
        self.outputs
    }

    /// Path of the canonical interface file for `service` inside `dir`.
    pub fn input_file(service: &str, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", service, INTERFACE_EXTENSION))
    }

    /// Build the full compiler argument list for `service` staged in `dir`.
    ///
    /// Generated files are written in place, next to the input file.
    pub fn args(&self, service: &str, dir: &Path) -> Vec<String> {
        let proto_path = format!("--proto_path={}", dir.display());
        let mut args = Vec::with_capacity(self.outputs.len() + 2);

        if self.proto_path_first {
            args.push(proto_path.clone());
        }
        args.extend(self.outputs.iter().map(|flag| flag.render(dir)));
        if !self.proto_path_first {
            args.push(proto_path);
        }
        args.push(Self::input_file(service, dir).display().to_string());

        args
    }
}
