//! Authentication error types

/// Authentication-related errors
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    /// Callback server or browser hand-off failed
    #[error("Network error: {0}")]
    Network(String),
    /// Reading or writing the token store failed
    #[error("Storage error: {0}")]
    Storage(String),
    /// The token is missing, malformed or was rejected
    #[error("Token error: {0}")]
    Token(String),
    /// Anything else, including timeouts
    #[error("Other: {0}")]
    Other(String),
}
