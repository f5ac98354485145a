//! Async client for the tool catalogue REST API with typed requests/responses
//! and wiremock tests.
//!
//! A 401 from any endpoint is reported as [`CatalogueError::Unauthorized`]
//! after the configured [`CredentialSource`] has been told to evict its token.

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// API resource implementations
pub mod resources;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::Client;
pub use crate::config::{CatalogueConfig, CredentialSource, StaticToken};
pub use crate::error::{ApiErrorObject, CatalogueError, FieldError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{CatalogueConfig, Client};
}
