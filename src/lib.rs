//! Gatehouse Server - HTTP Basic authentication in front of a downstream app.
//!
//! The binary wires the pieces together:
//! - `gatehouse-service`: credential cache, providers, validation, the gate
//! - `gatehouse-http`: axum middleware and error mapping
//!
//! The downstream is either a static directory or a placeholder handler.

pub mod config;

use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use gatehouse_service::{
    AuthGate, Bcrypt, ConfigProvider, FileConfigProvider, PasswordHasher, ServiceError,
    StaticConfigProvider, validate_users,
};

use crate::config::Config;

/// Builds the credential source named by the config.
///
/// Without a web config file there are no users and authentication is off.
pub fn credential_provider(config: &Config) -> Arc<dyn ConfigProvider> {
    match &config.web_config_file {
        Some(path) => {
            let provider = FileConfigProvider::new(path);
            tracing::info!(
                path = %provider.path().display(),
                "credentials read from web config file",
            );
            Arc::new(provider)
        }
        None => Arc::new(StaticConfigProvider::default()),
    }
}

/// Loads the current credentials once and validates every hash.
///
/// Returns the number of configured users.
pub fn check_web_config(
    provider: &dyn ConfigProvider,
    hasher: &dyn PasswordHasher,
) -> Result<usize, ServiceError> {
    let users = provider.load()?;
    validate_users(&users, hasher)?;
    Ok(users.len())
}

/// The handler that authenticated requests are forwarded to.
pub fn downstream(config: &Config) -> Router {
    match &config.web_root {
        Some(root) => Router::new().fallback_service(ServeDir::new(root)),
        None => Router::new().fallback(placeholder),
    }
}

async fn placeholder() -> &'static str {
    "gatehouse: request authorized\n"
}

/// Builds the gate and the full application router.
pub fn app(config: &Config, provider: Arc<dyn ConfigProvider>) -> Router {
    let gate = AuthGate::new(provider, Arc::new(Bcrypt), config.cache_size);
    gatehouse_http::protect(downstream(config), gate)
}
