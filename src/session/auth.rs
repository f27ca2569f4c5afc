//! Authentication collaborator.
//!
//! - `POST /users/login` with `{email, password}`
//! - `POST /users` with `{username, email, password}`
//!
//! Both answer with the user record including a bearer token.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{SessionError, SessionResult};
use crate::config::EngineConfig;
use crate::http;

/// A signed-in user as the backend reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub username: String,

    pub email: String,

    /// Bearer token for authenticated requests.
    pub token: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    #[must_use]
    pub fn new(username: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Exchanges credentials for a signed-in user.
#[allow(async_fn_in_trait)]
pub trait AuthClient {
    async fn login(&self, credentials: &Credentials) -> SessionResult<AuthUser>;

    async fn register(&self, registration: &Registration) -> SessionResult<AuthUser>;
}

/// `AuthClient` over the backend's user endpoints.
#[derive(Clone, Debug)]
pub struct HttpAuthClient {
    client: Client,
    base_url: String,
}

impl HttpAuthClient {
    pub fn new(config: &EngineConfig) -> SessionResult<Self> {
        Ok(Self {
            client: http::build_client(config.request_timeout)?,
            base_url: config.backend_url.clone(),
        })
    }

    async fn post<B: Serialize>(&self, segments: &[&str], body: &B) -> SessionResult<AuthUser> {
        let url = http::endpoint(&self.base_url, segments).map_err(SessionError::InvalidUrl)?;
        let response = self.client.post(url).json(body).send().await?;
        if !response.status().is_success() {
            let (status, message) = http::failure(response).await;
            warn!(status, %message, "auth request rejected");
            return Err(SessionError::Rejected { status, message });
        }
        Ok(response.json().await?)
    }
}

impl AuthClient for HttpAuthClient {
    async fn login(&self, credentials: &Credentials) -> SessionResult<AuthUser> {
        let user = self.post(&["users", "login"], credentials).await?;
        info!(user = %user.username, "signed in");
        Ok(user)
    }

    async fn register(&self, registration: &Registration) -> SessionResult<AuthUser> {
        let user = self.post(&["users"], registration).await?;
        info!(user = %user.username, "registered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accepts_either_id_field() {
        let a: AuthUser =
            serde_json::from_str(r#"{"_id":"u1","username":"ann","email":"a@x","token":"t"}"#).unwrap();
        let b: AuthUser =
            serde_json::from_str(r#"{"id":"u1","username":"ann","email":"a@x","token":"t"}"#).unwrap();
        assert_eq!(a, b);

        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["_id"], "u1");
    }

    #[test]
    fn test_credentials_body() {
        let json = serde_json::to_value(Credentials::new("a@x", "pw")).unwrap();
        assert_eq!(json, serde_json::json!({"email": "a@x", "password": "pw"}));
    }
}
