//! Service-layer error types.
//!
//! `ServiceError` is transport-agnostic. The HTTP crate maps it to status
//! codes; the server binary maps it to an exit status at startup.

use std::path::PathBuf;

/// The web configuration could not be read or parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read web config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse web config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A stored password hash has no extractable cost factor.
#[derive(Debug, thiserror::Error)]
#[error("malformed password hash: {0}")]
pub struct HashError(pub String);

/// Service error shared by the gate and configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Credentials could not be loaded for this request.
    #[error("unable to load credentials: {0}")]
    ConfigLoad(#[from] ConfigError),

    /// A configured user carries an unusable password hash.
    #[error("invalid password hash for user {username:?}: {source}")]
    MalformedHash {
        username: String,
        #[source]
        source: HashError,
    },
}
