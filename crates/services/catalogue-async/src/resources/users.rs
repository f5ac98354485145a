use crate::{client::Client, config::Config, error::CatalogueError, types::user::User};

/// API resource for `/api/users`
pub struct Users<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Users<'c, C> {
    /// Creates a new Users resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// The user owning the current bearer token
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Unauthorized`] when the token is missing or rejected.
    pub async fn me(&self) -> Result<User, CatalogueError> {
        self.client.get("/api/users/me").await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Users API resource
    #[must_use]
    pub const fn users(&self) -> Users<'_, C> {
        Users::new(self)
    }
}
