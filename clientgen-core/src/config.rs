//! Optional `clientgen.toml` configuration.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::{Error, Result, Service};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "clientgen.toml";

/// Placeholder replaced by the service name in the remote template.
pub const SERVICE_PLACEHOLDER: &str = "{service}";

/// Root of `clientgen.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where service repositories are cloned from
    #[serde(default)]
    pub source: SourceConfig,

    /// How the schema compiler is invoked
    #[serde(default)]
    pub compiler: CompilerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Remote URL template; `{service}` is replaced by the service name.
    pub remote: String,
    /// Version control client binary.
    pub git: String,
    /// Deadline for cloning, in seconds.
    pub timeout_secs: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            remote: "git@github.com:asmahood/{service}.git".to_string(),
            git: "git".to_string(),
            timeout_secs: None,
        }
    }
}

impl SourceConfig {
    /// Remote repository URL for `service`.
    pub fn remote_for(&self, service: Service) -> String {
        self.remote.replace(SERVICE_PLACEHOLDER, service.as_str())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Schema compiler binary.
    pub program: String,
    /// Deadline for one compiler run, in seconds.
    pub timeout_secs: Option<u64>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: "protoc".to_string(),
            timeout_secs: None,
        }
    }
}

impl CompilerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Parse a config from a string with a filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| Error::config_parse(e, content, filename))?;
        config.validate()?;
        Ok(config)
    }

    /// Open and parse a config file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::ConfigIo {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Load an explicitly named config, or `clientgen.toml` from `cwd` if present.
    ///
    /// A missing explicit file is an error; a missing default file yields defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::open(path),
            None => {
                let path: PathBuf = cwd.join(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::open(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.source.remote.contains(SERVICE_PLACEHOLDER) {
            return Err(Box::new(Error::InvalidConfig {
                message: format!(
                    "source.remote '{}' must contain '{}'",
                    self.source.remote, SERVICE_PLACEHOLDER
                ),
            }));
        }
        if self.source.git.is_empty() || self.compiler.program.is_empty() {
            return Err(Box::new(Error::InvalidConfig {
                message: "source.git and compiler.program must not be empty".to_string(),
            }));
        }
        Ok(())
    }
}
