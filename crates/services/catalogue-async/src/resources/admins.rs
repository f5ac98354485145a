use crate::{client::Client, config::Config, error::CatalogueError, types::user::AdminCheck};

/// API resource for `/api/admins`
pub struct Admins<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Admins<'c, C> {
    /// Creates a new Admins resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Ask the server whether the caller is a listed admin
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn is_admin(&self) -> Result<AdminCheck, CatalogueError> {
        self.client.get("/api/admins/is-admin").await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Admins API resource
    #[must_use]
    pub const fn admins(&self) -> Admins<'_, C> {
        Admins::new(self)
    }
}
