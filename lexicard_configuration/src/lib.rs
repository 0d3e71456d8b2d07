//! This crate contains all configuration-relevant code, including
//! the full configuration structure as well as methods needed to load
//! and validate it.
//!
//! Your starting point should probably be [`Configuration::load_from_default_path`].
//!
//! # Internals
//! The configuration file is first deserialized into "unresolved" structures,
//! which are then resolved (validated, with path placeholders replaced) into
//! the public ones. For example, [`Configuration`] is obtained by resolving
//! the internal `UnresolvedConfiguration`.

mod structure;
mod traits;
mod utilities;

use std::{borrow::Cow, io, path::PathBuf};

pub use structure::*;
use thiserror::Error;


#[derive(Debug, Error)]
pub enum MissingDirectoryCreationError {
    #[error("{} exists, but is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("unable to create directory {} due to IO error", .directory_path.display())]
    UnableToCreateDirectory {
        directory_path: PathBuf,

        #[source]
        error: io::Error,
    },
}


#[derive(Debug, Error)]
pub enum LoggingConfigurationError {
    #[error(
        "invalid tracing filter of type {} (doesn't parse with EnvFilter): {}",
        .kind,
        .invalid_filter
    )]
    InvalidTracingFilter {
        invalid_filter: String,

        kind: Cow<'static, str>,

        #[source]
        error: tracing_subscriber::filter::ParseError,
    },
}


#[derive(Debug, Error)]
pub enum DictionaryConfigurationError {
    #[error("invalid dictionary base URL: {}", .base_url)]
    InvalidBaseUrl {
        base_url: String,

        #[source]
        error: url::ParseError,
    },

    #[error("dictionary request timeout must be larger than zero")]
    ZeroRequestTimeout,
}


#[derive(Debug, Error)]
pub enum IdentityConfigurationError {
    #[error("identity token secret must not be empty")]
    EmptySecret,
}


#[derive(Debug, Error)]
pub enum ConfigurationResolutionError {
    #[error("error while resolving \"logging\" table")]
    LoggingConfigurationError {
        #[from]
        #[source]
        error: LoggingConfigurationError,
    },

    #[error("error while resolving \"dictionary\" table")]
    DictionaryConfigurationError {
        #[from]
        #[source]
        error: DictionaryConfigurationError,
    },

    #[error("error while resolving \"identity\" table")]
    IdentityConfigurationError {
        #[from]
        #[source]
        error: IdentityConfigurationError,
    },
}


#[derive(Debug, Error)]
pub enum ConfigurationLoadingError {
    #[error("unable to read configuration file at {}", .path.display())]
    UnableToReadConfigurationFile {
        path: PathBuf,

        #[source]
        error: io::Error,
    },

    #[error("unable to canonicalize configuration file path {}", .path.display())]
    UnableToCanonicalizePath {
        path: PathBuf,

        #[source]
        error: io::Error,
    },

    #[error("failed to parse the contents of the configuration file as TOML")]
    ParsingError {
        #[from]
        #[source]
        error: toml::de::Error,
    },

    #[error("failed to resolve and validate the contents of the configuration")]
    ResolutionError {
        #[from]
        #[source]
        error: ConfigurationResolutionError,
    },
}
