use std::io;
use std::path::PathBuf;

/// Errors raised while building [`SpecDocs`][crate::SpecDocs] or loading its [`Config`][crate::Config].
///
/// Every variant describes a startup-time misconfiguration. Requests are never answered with
/// one of these.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The spec document does not exist at the configured file path.
    #[error("spec file `{}` does not exist", path.display())]
    SpecNotFound {
        /// Configured file path.
        path: PathBuf,
    },
    /// The spec document exists but could not be read.
    #[error("failed to read spec file `{}`: {source}", path.display())]
    ReadSpec {
        /// Configured file path.
        path: PathBuf,
        /// Underlying io error.
        #[source]
        source: io::Error,
    },
    /// Joining the base path with a sub-path did not produce a valid URL path.
    #[error("cannot join `{base}` with `{segment}`: {reason}")]
    InvalidPath {
        /// Base path of the join.
        base: String,
        /// Segment joined to the base path.
        segment: String,
        /// What made the join fail.
        reason: &'static str,
    },
    /// Spec and UI endpoints resolved to the same URL path.
    #[error("spec url and ui url both resolve to `{0}`")]
    ConflictingPaths(String),
    /// Configuration file could not be read.
    #[error("failed to read config file `{}`: {source}", path.display())]
    ConfigRead {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying io error.
        #[source]
        source: io::Error,
    },
    /// Configuration file is not valid JSON for [`Config`][crate::Config].
    #[error("failed to parse config file `{}`: {source}", path.display())]
    ConfigParse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// The environment variable pointing to the config file is not set.
    #[error("missing `{0}` env variable, cannot load file config")]
    MissingConfigEnv(&'static str),
}

/// Result type with [`Error`] as its error.
pub type Result<T> = std::result::Result<T, Error>;
