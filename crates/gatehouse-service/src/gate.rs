//! Per-request Basic-auth decision.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{CacheKey, CredentialCache};
use crate::error::ServiceError;
use crate::hasher::PasswordHasher;
use crate::provider::ConfigProvider;

/// Username and password supplied by a client.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome of [`AuthGate::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Hand the request to the downstream handler.
    Forward,
    /// Answer with 401 and a Basic challenge.
    Reject,
}

impl Verdict {
    fn from_outcome(valid: bool) -> Self {
        if valid { Self::Forward } else { Self::Reject }
    }
}

/// Shared cache handle. One lock guards every cache operation.
pub type SharedCache = Arc<Mutex<CredentialCache>>;

/// Decides whether a request may pass, caching slow hash comparisons.
///
/// Cheap to clone; clones share the provider, hasher and cache.
#[derive(Clone)]
pub struct AuthGate {
    inner: Arc<Inner>,
}

struct Inner {
    provider: Arc<dyn ConfigProvider>,
    hasher: Arc<dyn PasswordHasher>,
    cache: SharedCache,
}

impl AuthGate {
    /// Creates a gate with a fresh cache of `cache_capacity` entries.
    pub fn new(
        provider: Arc<dyn ConfigProvider>,
        hasher: Arc<dyn PasswordHasher>,
        cache_capacity: usize,
    ) -> Self {
        let cache = Arc::new(Mutex::new(CredentialCache::new(cache_capacity)));
        Self::with_cache(provider, hasher, cache)
    }

    /// Creates a gate around an existing cache.
    pub fn with_cache(
        provider: Arc<dyn ConfigProvider>,
        hasher: Arc<dyn PasswordHasher>,
        cache: SharedCache,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                hasher,
                cache,
            }),
        }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.inner.cache
    }

    /// Decides a single request.
    ///
    /// Credentials are reloaded on every call. An empty credential set
    /// disables authentication. Unknown users are rejected without hashing.
    /// The cache lock is never held while the hasher runs.
    ///
    /// Blocks for the duration of a hash comparison on a cache miss.
    pub fn check(&self, credentials: Option<&BasicCredentials>) -> Result<Verdict, ServiceError> {
        let users = self.inner.provider.load()?;

        if users.is_empty() {
            return Ok(Verdict::Forward);
        }

        let Some(credentials) = credentials else {
            tracing::debug!("no basic credentials supplied");
            return Ok(Verdict::Reject);
        };

        let Some(hash) = users.hash_for(&credentials.username) else {
            tracing::debug!(user = %credentials.username, "unknown user");
            return Ok(Verdict::Reject);
        };

        let key = CacheKey::derive(&credentials.username, hash, &credentials.password);

        {
            let mut cache = self.inner.cache.lock();
            if let Some(valid) = cache.lookup(&key) {
                tracing::trace!(user = %credentials.username, valid, "verification cache hit");
                return Ok(Verdict::from_outcome(valid));
            }
            cache.make_room();
        }

        let valid = self.inner.hasher.compare(hash, &credentials.password);
        tracing::debug!(user = %credentials.username, valid, "password verified");

        self.inner.cache.lock().store(key, valid);

        Ok(Verdict::from_outcome(valid))
    }
}
