//! Password hashing and verification with bcrypt.
//!
//! Both operations run on tokio's blocking pool.

use crate::error::{Error, Result};

/// Hashes `password` with a fresh random salt at the given cost.
pub async fn hash_password(password: &str, cost: u32) -> Result<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || {
        bcrypt::hash(password, cost).map_err(|e| Error::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| Error::Hashing(format!("task join error: {e}")))?
}

/// Checks `password` against a stored bcrypt hash.
///
/// `Ok(false)` on mismatch; `Err` only if the stored hash cannot be parsed.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || {
        bcrypt::verify(password, &hash).map_err(|e| Error::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| Error::Hashing(format!("task join error: {e}")))?
}
