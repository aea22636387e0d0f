//! Registration and login.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tower_cookies::Cookies;

use crate::entity::user;
use crate::error::{Error, Result};
use crate::password;
use crate::session::SessionManager;
use crate::store::CredentialStore;

/// Account registration and password login.
#[derive(Debug, Clone)]
pub struct AuthService {
    store: CredentialStore,
    sessions: SessionManager,
    bcrypt_cost: u32,
    /// Verified against when the e-mail is unknown, so both login failures
    /// cost one bcrypt verification. Hashed on first use at `bcrypt_cost`.
    dummy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    pub fn new(store: CredentialStore, sessions: SessionManager, bcrypt_cost: u32) -> Self {
        Self {
            store,
            sessions,
            bcrypt_cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Creates an account with the e-mail exactly as submitted. Does not log
    /// the new user in.
    ///
    /// Fails with [`Error::DuplicateEmail`] if the e-mail is taken; the
    /// existing account is left untouched.
    pub async fn register(&self, email: &str, password: &str) -> Result<user::Model> {
        let hash = password::hash_password(password, self.bcrypt_cost).await?;
        let user = self.store.create_user(email, &hash).await?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Checks credentials without touching the session.
    ///
    /// An unknown e-mail and a wrong password produce the same
    /// [`Error::InvalidCredentials`], so callers cannot tell them apart.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<user::Model> {
        let Some(user) = self.store.find_user_by_email(email).await? else {
            let dummy = self.dummy_hash().await?;
            password::verify_password(password, dummy).await?;
            return Err(Error::InvalidCredentials);
        };

        if !password::verify_password(password, &user.password).await? {
            return Err(Error::InvalidCredentials);
        }
        Ok(user)
    }

    /// Authenticates and, on success, establishes a session for the user.
    pub async fn login(&self, cookies: &Cookies, email: &str, password: &str) -> Result<user::Model> {
        let user = self.authenticate(email, password).await?;
        self.sessions.establish(cookies, user.id)?;

        tracing::info!(user_id = user.id, "user logged in");
        Ok(user)
    }

    async fn dummy_hash(&self) -> Result<&str> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| {
                password::hash_password("notes-web dummy password", self.bcrypt_cost)
            })
            .await?;
        Ok(hash.as_str())
    }
}
