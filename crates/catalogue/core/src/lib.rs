//! Catalogue Core - ranking, hybrid-search fusion, session and admin policy
//!
//! The API client lives in `catalogue-async`; this crate decides what to
//! show. [`controller::CatalogueController`] owns the loaded catalogue and
//! drives both the local filter and the fused remote search.

pub mod controller;
pub mod filter;
pub mod fusion;
pub mod link;
pub mod policy;
pub mod sequencer;
pub mod session;
pub mod state;
pub mod tags;

pub use controller::{CatalogueController, HybridOutcome, SearchOptions};
pub use fusion::DocOnlyPolicy;
pub use policy::{AdminEnvironment, can_administer};
pub use session::{SessionContext, SessionSettings, SessionState};

/// Core error type
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    /// The catalogue API failed
    #[error(transparent)]
    Api(#[from] catalogue_async::CatalogueError),
    /// Token storage or login failed
    #[error(transparent)]
    Auth(#[from] catalogue_auth::AuthError),
    /// The current session may not perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// Other error
    #[error("Other: {0}")]
    Other(String),
}

impl CoreError {
    /// True when the server rejected the token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }
}
