//! Configured users and their password hashes.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ServiceError;
use crate::hasher::PasswordHasher;

/// Username to password-hash mapping, as loaded from configuration.
///
/// Ordered by username so validation reports the same first error every time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CredentialSet {
    users: BTreeMap<String, String>,
}

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user.
    pub fn with_user(mut self, username: impl Into<String>, hash: impl Into<String>) -> Self {
        self.users.insert(username.into(), hash.into());
        self
    }

    /// Returns the stored hash for `username`.
    pub fn hash_for(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.users.iter().map(|(u, h)| (u.as_str(), h.as_str()))
    }
}

impl<U: Into<String>, H: Into<String>> FromIterator<(U, H)> for CredentialSet {
    fn from_iter<I: IntoIterator<Item = (U, H)>>(iter: I) -> Self {
        Self {
            users: iter
                .into_iter()
                .map(|(u, h)| (u.into(), h.into()))
                .collect(),
        }
    }
}

/// Checks that every stored hash has an extractable cost factor.
///
/// Returns the first failure in username order. Run this before a
/// configuration is served.
pub fn validate_users(
    users: &CredentialSet,
    hasher: &dyn PasswordHasher,
) -> Result<(), ServiceError> {
    for (username, hash) in users.iter() {
        if let Err(source) = hasher.cost(hash) {
            return Err(ServiceError::MalformedHash {
                username: username.to_owned(),
                source,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Bcrypt;

    #[test]
    fn empty_set_is_valid() {
        assert!(validate_users(&CredentialSet::new(), &Bcrypt).is_ok());
    }

    #[test]
    fn well_formed_hashes_pass() {
        let users = CredentialSet::new()
            .with_user("alice", bcrypt::hash("a", 4).unwrap())
            .with_user("bob", bcrypt::hash("b", 5).unwrap());
        assert!(validate_users(&users, &Bcrypt).is_ok());
    }

    #[test]
    fn first_malformed_hash_is_reported() {
        let users = CredentialSet::new()
            .with_user("alice", bcrypt::hash("a", 4).unwrap())
            .with_user("carol", "plain-text")
            .with_user("bob", "$2y$nope");

        let err = validate_users(&users, &Bcrypt).unwrap_err();
        match err {
            ServiceError::MalformedHash { username, .. } => assert_eq!(username, "bob"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn hash_lookup_is_exact() {
        let users: CredentialSet = [("alice", "h1")].into_iter().collect();
        assert_eq!(users.hash_for("alice"), Some("h1"));
        assert_eq!(users.hash_for("Alice"), None);
        assert_eq!(users.len(), 1);
    }
}
