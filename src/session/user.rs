//! The signed-in user and its lifecycle.
//!
//! A `UserSession` is created once from a `KeyValueStore` and handed by
//! reference to whatever needs the token. Sign-in and registration write
//! the user through to the store; sign-out removes it.

use tracing::{info, warn};

use super::auth::{AuthClient, AuthUser, Credentials, Registration};
use super::error::SessionResult;
use super::store::KeyValueStore;

/// Store key holding the JSON-encoded `AuthUser`.
pub const USER_KEY: &str = "user";

#[derive(Debug)]
pub struct UserSession<S> {
    store: S,
    user: Option<AuthUser>,
}

impl<S: KeyValueStore> UserSession<S> {
    /// Restore the stored user, if any.
    ///
    /// An unreadable stored user is dropped from the store and the session
    /// starts signed out.
    pub fn load(store: S) -> Self {
        let user = store.get(USER_KEY).and_then(|raw| match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(%err, "discarding unreadable stored user");
                if let Err(err) = store.remove(USER_KEY) {
                    warn!(%err, "failed to clear stored user");
                }
                None
            }
        });
        Self { store, user }
    }

    #[must_use]
    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    /// Bearer token of the signed-in user.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.token.as_str())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn login<A: AuthClient>(
        &mut self,
        auth: &A,
        email: &str,
        password: &str,
    ) -> SessionResult<&AuthUser> {
        let user = auth.login(&Credentials::new(email, password)).await?;
        self.adopt(user)
    }

    pub async fn register<A: AuthClient>(
        &mut self,
        auth: &A,
        username: &str,
        email: &str,
        password: &str,
    ) -> SessionResult<&AuthUser> {
        let user = auth
            .register(&Registration::new(username, email, password))
            .await?;
        self.adopt(user)
    }

    /// Forget the user here and in the store.
    pub fn logout(&mut self) -> SessionResult<()> {
        self.store.remove(USER_KEY)?;
        if let Some(user) = self.user.take() {
            info!(user = %user.username, "signed out");
        }
        Ok(())
    }

    fn adopt(&mut self, user: AuthUser) -> SessionResult<&AuthUser> {
        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;
        Ok(self.user.insert(user))
    }
}
