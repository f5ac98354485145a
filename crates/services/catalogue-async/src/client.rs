use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use crate::{config::Config, error::CatalogueError};

/// Catalogue API client
///
/// The client is generic over a [`Config`] implementation that provides
/// credentials and the API base URL. Requests are never retried.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
}

impl Client<crate::config::CatalogueConfig> {
    /// Creates a new client with default configuration
    ///
    /// Uses environment variables:
    /// - `CATALOGUE_TOKEN` for the bearer token
    /// - `CATALOGUE_API_BASE` for a custom API base URL
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(crate::config::CatalogueConfig::new())
    }
}

impl<C: Config + Default> Default for Client<C> {
    fn default() -> Self {
        Self::with_config(C::default())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    #[must_use]
    pub fn with_config(config: C) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {e}");
                reqwest::Client::new()
            });
        Self { http, config }
    }

    /// Rebuilds the HTTP client with a whole-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        match reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .timeout(timeout)
            .build()
        {
            Ok(http) => self.http = http,
            Err(e) => tracing::warn!("Keeping default HTTP client: {e}"),
        }
        self
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    pub(crate) async fn get<O>(&self, path: &str) -> Result<O, CatalogueError>
    where
        O: DeserializeOwned,
    {
        self.get_with_query(path, &[] as &[(&str, &str)]).await
    }

    pub(crate) async fn get_with_query<Q, O>(&self, path: &str, query: &Q) -> Result<O, CatalogueError>
    where
        Q: Serialize + ?Sized + Sync,
        O: DeserializeOwned,
    {
        let request = self
            .http
            .get(self.config.url(path))
            .headers(self.config.headers()?)
            .query(query)
            .build()?;
        self.execute(request).await
    }

    pub(crate) async fn post<I, O>(&self, path: &str, body: &I) -> Result<O, CatalogueError>
    where
        I: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub(crate) async fn put<I, O>(&self, path: &str, body: &I) -> Result<O, CatalogueError>
    where
        I: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), CatalogueError> {
        let request = self
            .http
            .delete(self.config.url(path))
            .headers(self.config.headers()?)
            .build()?;
        self.execute_raw(request).await.map(|_| ())
    }

    async fn send_json<I, O>(&self, method: Method, path: &str, body: &I) -> Result<O, CatalogueError>
    where
        I: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let request = self
            .http
            .request(method, self.config.url(path))
            .headers(self.config.headers()?)
            .json(body)
            .build()?;
        self.execute(request).await
    }

    async fn execute<O>(&self, request: reqwest::Request) -> Result<O, CatalogueError>
    where
        O: DeserializeOwned,
    {
        let bytes = self.execute_raw(request).await?;
        serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))
    }

    async fn execute_raw(&self, request: reqwest::Request) -> Result<bytes::Bytes, CatalogueError> {
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self
            .http
            .execute(request)
            .await
            .map_err(CatalogueError::Reqwest)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(CatalogueError::Reqwest)?;
        tracing::debug!(%method, %path, status = status.as_u16(), "catalogue API response");

        if status.is_success() {
            return Ok(bytes);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.config.on_unauthorized();
        }

        Err(crate::error::deserialize_api_error(status, &bytes))
    }
}
