//! Client-side signed session cookies.
//!
//! The session value set lives entirely in the cookie: the authenticated user
//! id plus the time the session was issued, MessagePack-encoded, base64'd and
//! HMAC-signed with a key derived from the configured secret. The server keeps
//! no session table; verifying the signature is the whole lookup.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use time::OffsetDateTime;
use tower_cookies::{cookie::SameSite, Cookie, Cookies, Key};

use crate::config::SessionConfig;
use crate::error::{Error, Result};

/// The value set carried by a session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionValues {
    pub user_id: i32,
    /// Unix timestamp, seconds.
    pub issued_at: i64,
}

/// Issues, reads and destroys signed session cookies.
///
/// Built once at startup from [`SessionConfig`] and shared read-only by every
/// request afterwards.
#[derive(Clone)]
pub struct SessionManager {
    key: Key,
    cookie_name: String,
    max_age: time::Duration,
    secure: bool,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("cookie_name", &self.cookie_name)
            .field("max_age", &self.max_age)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new(config: &SessionConfig) -> Self {
        // Signing keys must be 64 bytes; SHA-512 lets the secret be any length.
        let digest = Sha512::digest(config.secret.as_bytes());
        Self {
            key: Key::from(&digest[..]),
            cookie_name: config.cookie_name.clone(),
            max_age: config.max_age,
            secure: config.secure,
        }
    }

    /// Starts a session for `user_id` by adding a signed cookie to the response.
    pub fn establish(&self, cookies: &Cookies, user_id: i32) -> Result<()> {
        let values = SessionValues {
            user_id,
            issued_at: OffsetDateTime::now_utc().unix_timestamp(),
        };
        let cookie = Cookie::build((self.cookie_name.clone(), encode(&values)?))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(self.max_age)
            .build();

        cookies.signed(&self.key).add(cookie);
        Ok(())
    }

    /// Returns the session's user id, or `None` when there is no usable session.
    ///
    /// A missing cookie, a bad signature, an undecodable value and an expired
    /// session are all the same outcome: unauthenticated.
    pub fn read(&self, cookies: &Cookies) -> Option<i32> {
        let cookie = cookies.signed(&self.key).get(&self.cookie_name)?;
        self.decode_at(cookie.value(), OffsetDateTime::now_utc())
            .map(|values| values.user_id)
    }

    /// Clears the session: empty value, expiry forced into the past.
    pub fn destroy(&self, cookies: &Cookies) {
        let cookie = Cookie::build((self.cookie_name.clone(), ""))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::ZERO)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .build();

        cookies.add(cookie);
    }

    fn decode_at(&self, raw: &str, now: OffsetDateTime) -> Option<SessionValues> {
        let values = match decode(raw) {
            Ok(values) => values,
            Err(reason) => {
                tracing::debug!(%reason, "discarding undecodable session cookie");
                return None;
            }
        };

        let age = now.unix_timestamp() - values.issued_at;
        if age > self.max_age.whole_seconds() {
            tracing::debug!(user_id = values.user_id, age, "discarding expired session");
            return None;
        }
        Some(values)
    }
}

fn encode(values: &SessionValues) -> Result<String> {
    let bytes = rmp_serde::to_vec(values).map_err(|e| Error::Session(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

fn decode(raw: &str) -> std::result::Result<SessionValues, String> {
    let bytes = URL_SAFE_NO_PAD.decode(raw).map_err(|e| e.to_string())?;
    rmp_serde::from_slice(&bytes).map_err(|e| e.to_string())
}
