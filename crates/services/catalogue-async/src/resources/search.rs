use crate::{
    client::Client,
    config::Config,
    error::CatalogueError,
    types::search::{AiSearchResponse, DocSearchResponse, SearchParams},
};

/// API resource for the `/api/ai-search` metadata search
pub struct AiSearch<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> AiSearch<'c, C> {
    /// Creates a new AiSearch resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Run a metadata search
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn query(&self, params: &SearchParams) -> Result<AiSearchResponse, CatalogueError> {
        self.client.get_with_query("/api/ai-search", params).await
    }
}

/// API resource for the `/api/doc-search` document-content search
pub struct DocSearch<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> DocSearch<'c, C> {
    /// Creates a new DocSearch resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Run a document search
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn query(&self, params: &SearchParams) -> Result<DocSearchResponse, CatalogueError> {
        self.client.get_with_query("/api/doc-search", params).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the metadata search resource
    #[must_use]
    pub const fn ai_search(&self) -> AiSearch<'_, C> {
        AiSearch::new(self)
    }

    /// Returns the document search resource
    #[must_use]
    pub const fn doc_search(&self) -> DocSearch<'_, C> {
        DocSearch::new(self)
    }
}
