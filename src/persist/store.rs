//! Deck storage collaborator.
//!
//! `DeckStore` is the seam between the engine and wherever decks live.
//! `HttpDeckStore` talks to the REST backend:
//!
//! | Operation | Request               |
//! |-----------|-----------------------|
//! | create    | `POST /decks`         |
//! | update    | `PUT /decks/{id}`     |
//! | get       | `GET /decks/{id}`     |
//! | list      | `GET /decks`          |
//! | delete    | `DELETE /decks/{id}`  |
//!
//! Requests carry the signed-in user's bearer token when there is one.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::error::{PersistenceError, PersistenceResult};
use super::wire::{DeckPayload, DeckRecord};
use crate::config::EngineConfig;
use crate::deck::DeckId;
use crate::http;

/// Where decks are created, read, updated and deleted.
#[allow(async_fn_in_trait)]
pub trait DeckStore {
    /// Store a new deck; the record carries the assigned id and stats.
    async fn create(&self, deck: &DeckPayload) -> PersistenceResult<DeckRecord>;

    /// Replace a stored deck.
    async fn update(&self, id: &DeckId, deck: &DeckPayload) -> PersistenceResult<DeckRecord>;

    async fn get(&self, id: &DeckId) -> PersistenceResult<DeckRecord>;

    /// All decks of the signed-in user.
    async fn list(&self) -> PersistenceResult<Vec<DeckRecord>>;

    async fn delete(&self, id: &DeckId) -> PersistenceResult<()>;
}

/// `DeckStore` over the backend's REST API.
#[derive(Clone, Debug)]
pub struct HttpDeckStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpDeckStore {
    /// Create an unauthenticated store from configuration.
    pub fn new(config: &EngineConfig) -> PersistenceResult<Self> {
        Ok(Self {
            client: http::build_client(config.request_timeout)?,
            base_url: config.backend_url.clone(),
            token: None,
        })
    }

    /// Attach (or drop) the bearer token sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn request(&self, method: Method, segments: &[&str]) -> PersistenceResult<RequestBuilder> {
        let url = http::endpoint(&self.base_url, segments).map_err(PersistenceError::InvalidUrl)?;
        let builder = self.client.request(method, url);
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn execute(&self, request: RequestBuilder) -> PersistenceResult<Response> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let (status, message) = http::failure(response).await;
            warn!(status, %message, "deck request rejected");
            return Err(PersistenceError::Rejected { status, message });
        }
        Ok(response)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> PersistenceResult<T> {
        Ok(self.execute(request).await?.json().await?)
    }
}

impl DeckStore for HttpDeckStore {
    async fn create(&self, deck: &DeckPayload) -> PersistenceResult<DeckRecord> {
        let request = self.request(Method::POST, &["decks"])?.json(deck);
        let record: DeckRecord = self.send(request).await?;
        info!(deck = %record.id, name = %record.name, "deck created");
        Ok(record)
    }

    async fn update(&self, id: &DeckId, deck: &DeckPayload) -> PersistenceResult<DeckRecord> {
        let request = self.request(Method::PUT, &["decks", id.as_str()])?.json(deck);
        let record: DeckRecord = self.send(request).await?;
        info!(deck = %record.id, name = %record.name, "deck updated");
        Ok(record)
    }

    async fn get(&self, id: &DeckId) -> PersistenceResult<DeckRecord> {
        let request = self.request(Method::GET, &["decks", id.as_str()])?;
        self.send(request).await
    }

    async fn list(&self) -> PersistenceResult<Vec<DeckRecord>> {
        let request = self.request(Method::GET, &["decks"])?;
        self.send(request).await
    }

    async fn delete(&self, id: &DeckId) -> PersistenceResult<()> {
        let request = self.request(Method::DELETE, &["decks", id.as_str()])?;
        self.execute(request).await?;
        info!(deck = %id, "deck deleted");
        Ok(())
    }
}
