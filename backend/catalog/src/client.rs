//! # Catalog Client
//!
//! Thin wrapper over the catalog REST API.
//!
//! ## Fallback
//! Reads degrade instead of failing: when a list call cannot be completed
//! (transport error, non-2xx status, undecodable body) the caller gets the
//! embedded fixtures for the requested page and a message saying mock data is
//! in use. Single-record reads do the same when a fixture with that id exists.
//!
//! Writes never fall back. Their errors go straight to the caller.
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::CatalogError,
    models::{Ack, Item, Listing},
    pagination::PageWindow,
    resource::Resource,
};

pub const MOCK_LIST_MESSAGE: &str = "Using mock data (API unavailable)";
pub const MOCK_ITEM_MESSAGE: &str = "Using mock data";

#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Same client, authenticating every call with `token`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> Result<T, CatalogError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::Status {
                status,
                path: path.to_string(),
            });
        }

        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes).map_err(|source| CatalogError::Decode {
            path: path.to_string(),
            source,
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, CatalogError> {
        self.send(self.request(Method::GET, path), path).await
    }

    async fn item<R: Resource>(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> Result<Item<R>, CatalogError> {
        let body: Value = self.send(builder, path).await?;

        Item::from_body(&body).map_err(|source| CatalogError::Decode {
            path: path.to_string(),
            source,
        })
    }

    pub async fn try_list<R: Resource>(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<Listing<R>, CatalogError> {
        let builder = self
            .request(Method::GET, R::PATH)
            .query(&[("page", page), ("limit", limit)]);

        let body: Value = self.send(builder, R::PATH).await?;

        Ok(Listing::from_body(&body, page, limit, R::PATH))
    }

    /// One page of `R`, or the fixtures for that page when the call fails or
    /// the body is not JSON. Rows that do not decode are dropped, not mocked.
    pub async fn list<R: Resource>(&self, page: u32, limit: u32) -> Listing<R> {
        match self.try_list::<R>(page, limit).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!("Failed to fetch {} list, using mock data: {e}", R::LABEL);
                mock_listing(page, limit)
            }
        }
    }

    pub async fn get<R: Resource>(&self, id: u64) -> Result<Item<R>, CatalogError> {
        let path = format!("{}/{id}", R::PATH);

        match self.item::<R>(self.request(Method::GET, &path), &path).await {
            Ok(item) => Ok(item),
            Err(e) => {
                warn!("Failed to fetch {} {id}: {e}", R::LABEL);

                R::fixtures()
                    .into_iter()
                    .find(|fixture| fixture.id() == id)
                    .map(|data| Item {
                        success: true,
                        message: MOCK_ITEM_MESSAGE.to_string(),
                        data,
                        fallback: true,
                    })
                    .ok_or_else(|| CatalogError::Unavailable(format!("{} {id}", R::LABEL)))
            }
        }
    }

    pub async fn create<R: Resource>(&self, input: &R::Input) -> Result<Item<R>, CatalogError> {
        debug!("Creating {}", R::LABEL);

        let builder = self.request(Method::POST, R::PATH).json(input);
        self.item(builder, R::PATH).await
    }

    /// Partial update, only the fields present in `patch` are sent.
    pub async fn update<R: Resource, P: Serialize + ?Sized>(
        &self,
        id: u64,
        patch: &P,
    ) -> Result<Item<R>, CatalogError> {
        debug!("Updating {} {id}", R::LABEL);

        let path = format!("{}/{id}", R::PATH);
        let builder = self.request(Method::PUT, &path).json(patch);
        self.item(builder, &path).await
    }

    pub async fn delete<R: Resource>(&self, id: u64) -> Result<Ack, CatalogError> {
        debug!("Deleting {} {id}", R::LABEL);

        let path = format!("{}/{id}", R::PATH);
        self.acknowledge(path, format!("Deleted {} {id}", R::LABEL)).await
    }

    /// DELETE whose body may be empty. Some deployments answer 204.
    pub(crate) async fn acknowledge(
        &self,
        path: String,
        done: String,
    ) -> Result<Ack, CatalogError> {
        let response = self.request(Method::DELETE, &path).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::Status { status, path });
        }

        let bytes = response.bytes().await?;
        Ok(Ack::from_body(&bytes, done))
    }
}

pub fn mock_listing<R: Resource>(page: u32, limit: u32) -> Listing<R> {
    let fixtures = R::fixtures();
    let window = PageWindow::new(page, limit, fixtures.len() as u64);

    Listing {
        success: true,
        message: MOCK_LIST_MESSAGE.to_string(),
        data: window.slice(&fixtures),
        total: window.total,
        page: window.page,
        limit: window.limit,
        total_pages: window.total_pages(),
        fallback: true,
    }
}
