//! Login and token storage for the tool catalogue client.
//!
//! The catalogue delegates authentication to an external service that
//! redirects back with a bearer token. This crate runs the local
//! redirect target, keeps the token in a [`SecureStore`], and exposes it
//! to the API client through [`TokenStore`].

pub mod callback;
pub mod error;
pub mod login;
pub mod store;
pub mod token;

pub use callback::CallbackServer;
pub use error::AuthError;
pub use login::{BrowserLogin, PendingLogin};
pub use store::{KeyringStore, MemoryStore, SecureStore, XdgFileStore};
pub use token::{TOKEN_KEY, TokenStore};
