//! Card catalog collaborator.
//!
//! The backend proxies the public card database:
//! - `GET /cards/searchCards?q=..&page=..` -> `{ data: [...], has_more }`
//! - `GET /cards/{id}`
//! - `GET /cards/name/{name}`

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use super::error::{CatalogError, CatalogResult};
use crate::cards::{CardId, CardRecord};
use crate::config::EngineConfig;
use crate::http;

/// One page of search results as the catalog sent it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub data: Vec<CardRecord>,

    #[serde(default)]
    pub has_more: bool,
}

/// Read access to the card catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogClient {
    /// One page (1-based) of cards matching `query`.
    async fn search(&self, query: &str, page: u32) -> CatalogResult<SearchPage>;

    async fn card_by_id(&self, id: &CardId) -> CatalogResult<CardRecord>;

    /// Exact-name lookup.
    async fn card_by_name(&self, name: &str) -> CatalogResult<CardRecord>;
}

/// `CatalogClient` over the backend's card endpoints.
#[derive(Clone, Debug)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(config: &EngineConfig) -> CatalogResult<Self> {
        Ok(Self {
            client: http::build_client(config.request_timeout)?,
            base_url: config.backend_url.clone(),
        })
    }

    fn get(&self, segments: &[&str]) -> CatalogResult<RequestBuilder> {
        let url = http::endpoint(&self.base_url, segments).map_err(CatalogError::InvalidUrl)?;
        Ok(self.client.get(url))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> CatalogResult<T> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let (status, message) = http::failure(response).await;
            warn!(status, %message, "catalog request rejected");
            return Err(CatalogError::Query { status, message });
        }
        Ok(response.json().await?)
    }
}

impl CatalogClient for HttpCatalogClient {
    async fn search(&self, query: &str, page: u32) -> CatalogResult<SearchPage> {
        if page == 0 {
            return Err(CatalogError::InvalidPage(page));
        }
        let page = page.to_string();
        let request = self
            .get(&["cards", "searchCards"])?
            .query(&[("q", query), ("page", page.as_str())]);
        self.send(request).await
    }

    async fn card_by_id(&self, id: &CardId) -> CatalogResult<CardRecord> {
        let request = self.get(&["cards", id.as_str()])?;
        self.send(request).await
    }

    async fn card_by_name(&self, name: &str) -> CatalogResult<CardRecord> {
        let request = self.get(&["cards", "name", name])?;
        self.send(request).await
    }
}
