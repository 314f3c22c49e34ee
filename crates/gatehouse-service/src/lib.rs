//! Gatehouse Service: core logic for the Gatehouse Basic-auth gate.
//!
//! This crate contains the transport-agnostic pieces:
//! the verification-outcome cache, credential loading and validation,
//! the password-hash seam, and the per-request [`AuthGate`] decision.
//!
//! The HTTP crate (`gatehouse-http`) extracts credentials from requests and
//! maps [`Verdict`]s and [`ServiceError`]s onto responses.
//!
//! No transport dependencies: no axum, no tokio.

pub mod cache;
pub mod credentials;
pub mod error;
pub mod gate;
pub mod hasher;
pub mod provider;

pub use cache::{CacheKey, CredentialCache};
pub use credentials::{CredentialSet, validate_users};
pub use error::{ConfigError, HashError, ServiceError};
pub use gate::{AuthGate, BasicCredentials, SharedCache, Verdict};
pub use hasher::{Bcrypt, PasswordHasher};
pub use provider::{ConfigProvider, FileConfigProvider, StaticConfigProvider, WebConfig};
