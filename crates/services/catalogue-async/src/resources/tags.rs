use crate::{client::Client, config::Config, error::CatalogueError, types::tag::TagStats};

/// API resource for `/api/tags`
pub struct Tags<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Tags<'c, C> {
    /// Creates a new Tags resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Every distinct tag across the catalogue
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(&self) -> Result<Vec<String>, CatalogueError> {
        self.client.get("/api/tags").await
    }

    /// Per-tag usage counts
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn stats(&self) -> Result<TagStats, CatalogueError> {
        self.client.get("/api/tags/stats").await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Tags API resource
    #[must_use]
    pub const fn tags(&self) -> Tags<'_, C> {
        Tags::new(self)
    }
}
