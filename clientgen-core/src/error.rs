use std::{path::PathBuf, time::Duration};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::{Language, Service, Stage, Visibility};

/// Result type for client generation (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("client code generation is not supported for '{language}'")]
    #[diagnostic(
        code(clientgen::unsupported_language),
        help("valid languages are: go, ruby, python, javascript")
    )]
    UnsupportedLanguage { language: String },

    #[error("generating for all services is not supported")]
    #[diagnostic(
        code(clientgen::all_services),
        help("pass a single service with '--service <name>'")
    )]
    AllServices,

    #[error("unknown service '{service}'")]
    #[diagnostic(
        code(clientgen::unknown_service),
        help("run 'generate-clients services' to list the known services")
    )]
    UnknownService { service: String },

    #[error("the service '{service}' does not have a {visibility} protobuf defined")]
    #[diagnostic(
        code(clientgen::missing_interface),
        help("run 'generate-clients services' to see which definitions each service exposes")
    )]
    MissingInterface {
        service: Service,
        visibility: Visibility,
    },

    #[error("failed to read config '{path}'")]
    #[diagnostic(code(clientgen::config_io))]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    #[diagnostic(code(clientgen::config_parse))]
    ConfigParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(clientgen::invalid_config))]
    InvalidConfig { message: String },

    #[error("cannot create temporary workspace")]
    #[diagnostic(code(clientgen::workspace))]
    CreateWorkspace {
        #[source]
        source: std::io::Error,
    },

    #[error("could not remove workspace '{path}'")]
    #[diagnostic(code(clientgen::workspace))]
    DestroyWorkspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start '{program}'")]
    #[diagnostic(help("make sure '{program}' is installed and on your PATH"))]
    Spawn {
        stage: Stage,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("lost track of '{program}' while waiting for it to exit")]
    Wait {
        stage: Stage,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' did not finish within {timeout:?}")]
    #[diagnostic(help("raise 'timeout_secs' in the config file"))]
    TimedOut {
        stage: Stage,
        program: String,
        timeout: Duration,
    },

    #[error("failed to clone '{remote}' for service '{service}' ({status})")]
    #[diagnostic(code(clientgen::fetch), help("{detail}"))]
    FetchFailed {
        service: Service,
        remote: String,
        status: String,
        detail: String,
    },

    #[error("cloned service '{service}' has no protobuf directory at '{path}'")]
    #[diagnostic(code(clientgen::fetch))]
    FetchIncomplete { service: Service, path: PathBuf },

    #[error("failed to read {stage} directory '{path}'")]
    ReadDir {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no protobuf definition found in '{path}'")]
    #[diagnostic(code(clientgen::no_interface))]
    NoInterface { path: PathBuf },

    #[error("multiple protobuf definitions found in '{path}': {}", .candidates.join(", "))]
    #[diagnostic(
        code(clientgen::ambiguous_interface),
        help("a service must expose exactly one .proto file per visibility")
    )]
    AmbiguousInterface {
        path: PathBuf,
        candidates: Vec<String>,
    },

    #[error("cannot copy '{from}' to '{to}'")]
    CopyFile {
        stage: Stage,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{language} generator exited with {status}")]
    #[diagnostic(code(clientgen::generate), help("{stderr}"))]
    CompilerFailed {
        language: Language,
        status: String,
        stderr: String,
    },

    #[error("output directory '{path}' does not exist")]
    #[diagnostic(
        code(clientgen::output_missing),
        help("create the directory first; it is not created automatically")
    )]
    OutputMissing { path: PathBuf },

    #[error("output path '{path}' is not a directory")]
    #[diagnostic(code(clientgen::output))]
    OutputNotDirectory { path: PathBuf },

    #[error("cannot resolve the current working directory")]
    #[diagnostic(help("pass an absolute output directory"))]
    WorkingDir {
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// The pipeline stage this error was raised in.
    pub fn stage(&self) -> Stage {
        match self {
            Error::UnsupportedLanguage { .. }
            | Error::AllServices
            | Error::UnknownService { .. }
            | Error::MissingInterface { .. }
            | Error::ConfigIo { .. }
            | Error::ConfigParse { .. }
            | Error::InvalidConfig { .. } => Stage::Validate,
            Error::CreateWorkspace { .. } | Error::DestroyWorkspace { .. } => Stage::Workspace,
            Error::FetchFailed { .. } | Error::FetchIncomplete { .. } => Stage::Fetch,
            Error::NoInterface { .. } | Error::AmbiguousInterface { .. } => Stage::Extract,
            Error::CompilerFailed { .. } => Stage::Generate,
            Error::OutputMissing { .. }
            | Error::OutputNotDirectory { .. }
            | Error::WorkingDir { .. } => Stage::Collect,
            Error::Spawn { stage, .. }
            | Error::Wait { stage, .. }
            | Error::TimedOut { stage, .. }
            | Error::ReadDir { stage, .. }
            | Error::CopyFile { stage, .. } => *stage,
        }
    }

    /// Create a config parse error from a toml error with source context
    pub fn config_parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ConfigParse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a directory read error
    pub fn read_dir(stage: Stage, path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::ReadDir {
            stage,
            path: path.into(),
            source,
        })
    }

    /// Create a file copy error
    pub fn copy_file(
        stage: Stage,
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Box<Self> {
        Box::new(Error::CopyFile {
            stage,
            from: from.into(),
            to: to.into(),
            source,
        })
    }
}
