//! Credential sources consulted by the gate on every request.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Deserialize;

use crate::credentials::CredentialSet;
use crate::error::ConfigError;

/// Loads the current credential set.
///
/// Called once per authenticated request, so implementations should reflect
/// configuration changes without a restart.
pub trait ConfigProvider: Send + Sync {
    fn load(&self) -> Result<CredentialSet, ConfigError>;
}

/// On-disk web configuration.
///
/// ```yaml
/// basic_auth_users:
///   alice: $2y$10$...
/// ```
///
/// Exporter-toolkit files may also carry `tls_server_config` and
/// `http_server_config`. Both are accepted and ignored; any other top-level
/// key is an error.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebConfig {
    #[serde(default)]
    pub basic_auth_users: CredentialSet,
    #[serde(default, rename = "tls_server_config")]
    _tls_server_config: Option<serde_yaml::Value>,
    #[serde(default, rename = "http_server_config")]
    _http_server_config: Option<serde_yaml::Value>,
}

impl WebConfig {
    /// Parses a YAML document. Blank input is an empty configuration.
    pub fn from_yaml(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Re-reads a YAML web configuration file on every load.
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigProvider for FileConfigProvider {
    fn load(&self) -> Result<CredentialSet, ConfigError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        WebConfig::from_yaml(&self.path, &contents).map(|c| c.basic_auth_users)
    }
}

/// In-memory credential set that can be swapped while serving.
#[derive(Debug, Default)]
pub struct StaticConfigProvider {
    users: ArcSwap<CredentialSet>,
}

impl StaticConfigProvider {
    pub fn new(users: CredentialSet) -> Self {
        Self {
            users: ArcSwap::from_pointee(users),
        }
    }

    /// Replaces the credential set seen by subsequent loads.
    pub fn replace(&self, users: CredentialSet) {
        self.users.store(Arc::new(users));
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn load(&self) -> Result<CredentialSet, ConfigError> {
        Ok(CredentialSet::clone(&self.users.load()))
    }
}
