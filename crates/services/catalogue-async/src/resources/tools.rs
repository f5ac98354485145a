use crate::{
    client::Client,
    config::Config,
    error::CatalogueError,
    types::tool::{Tool, ToolCreate, ToolUpdate},
};

/// API resource for `/api/tools`
pub struct Tools<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Tools<'c, C> {
    /// Creates a new Tools resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// List every tool in the catalogue
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(&self) -> Result<Vec<Tool>, CatalogueError> {
        self.client.get("/api/tools").await
    }

    /// Fetch one tool by id
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Config`] for an empty, `.` or `..` id, or an
    /// error if the request fails or the API returns an error.
    pub async fn get(&self, id: &str) -> Result<Tool, CatalogueError> {
        self.client.get(&item_path(id)?).await
    }

    /// Create a tool
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Validation`] when the server rejects fields.
    pub async fn create(&self, req: &ToolCreate) -> Result<Tool, CatalogueError> {
        self.client.post("/api/tools", req).await
    }

    /// Partially update a tool
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Validation`] when the server rejects fields.
    pub async fn update(&self, id: &str, req: &ToolUpdate) -> Result<Tool, CatalogueError> {
        self.client.put(&item_path(id)?, req).await
    }

    /// Delete a tool
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn delete(&self, id: &str) -> Result<(), CatalogueError> {
        self.client.delete(&item_path(id)?).await
    }
}

/// `/api/tools/{id}` with `id` percent-encoded as one path segment.
fn item_path(id: &str) -> Result<String, CatalogueError> {
    if matches!(id.trim(), "" | "." | "..") {
        return Err(CatalogueError::Config(format!("invalid tool id '{id}'")));
    }
    let mut url = url::Url::parse("http://catalogue/api/tools")
        .map_err(|e| CatalogueError::Config(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| CatalogueError::Config("tool path is not hierarchical".into()))?
        .push(id);
    Ok(url.path().to_string())
}

impl<C: Config> crate::Client<C> {
    /// Returns the Tools API resource
    #[must_use]
    pub const fn tools(&self) -> Tools<'_, C> {
        Tools::new(self)
    }
}
