//! Error types. Everything here is fatal at startup or at the end of a
//! generation; the tick loop itself cannot fail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("config file {path}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for [`crate::simulation::params::Config`].
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors raised while writing or reading a persisted network.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact could not be read or written.
    #[error("network artifact {path}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file does not start with the artifact header.
    #[error("{0} is not a network artifact")]
    BadHeader(PathBuf),
    /// Encoding or decoding the payload failed.
    #[error("network artifact encoding: {0}")]
    Codec(#[from] postcard::Error),
    /// The decoded network cannot take the course inputs or its layers do
    /// not chain.
    #[error("network shape: {0}")]
    Shape(String),
}

/// Errors surfaced by the evaluation driver.
#[derive(Debug, Error)]
pub enum TrainingError {
    /// Persisting the best network failed.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
