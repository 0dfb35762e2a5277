use bcrypt::{hash, verify, DEFAULT_COST};

use crate::shared::AppError;

/// Checks a submitted password against a stored bcrypt hash.
///
/// The comparison is delegated entirely to bcrypt, which re-derives the hash
/// under the stored salt and cost. A malformed stored hash is an
/// infrastructure fault, not a credential verdict. The plaintext is never
/// logged and never appears in the returned error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    verify(password, stored_hash).map_err(|_| AppError::Internal)
}

/// Hashes a password for storage with the default bcrypt cost.
///
/// Registration lives outside this core, but account provisioning and test
/// seeding need a hash that `verify_password` accepts.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(|_| AppError::Internal)
}
