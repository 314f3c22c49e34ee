//! Password hash comparison seam.

use crate::error::HashError;

/// Slow password-hash primitive used by the gate and by validation.
pub trait PasswordHasher: Send + Sync {
    /// Returns `true` if `plaintext` matches `hash`. Any failure is a mismatch.
    fn compare(&self, hash: &str, plaintext: &str) -> bool;

    /// Extracts the cost factor, failing when `hash` is not well formed.
    fn cost(&self, hash: &str) -> Result<u32, HashError>;
}

/// bcrypt-backed [`PasswordHasher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Bcrypt;

impl PasswordHasher for Bcrypt {
    fn compare(&self, hash: &str, plaintext: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }

    fn cost(&self, hash: &str) -> Result<u32, HashError> {
        hash.parse::<bcrypt::HashParts>()
            .map(|parts| parts.get_cost())
            .map_err(|e| HashError(e.to_string()))
    }
}
