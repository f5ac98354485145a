//! Browser-based login: open the auth service, capture the redirect, store the token.

use crate::{
    callback::{CALLBACK_TIMEOUT, CallbackServer},
    error::AuthError,
    token::TokenStore,
};
use rand::{RngCore, rngs::OsRng};
use tokio::time::Duration;
use url::Url;

/// Settings for one browser login.
#[derive(Debug, Clone)]
pub struct BrowserLogin {
    login_url: String,
    callback_port: u16,
    timeout: Duration,
}

impl BrowserLogin {
    /// Login against `login_url`, redirecting back to `127.0.0.1:{callback_port}`
    pub fn new(login_url: impl Into<String>, callback_port: u16) -> Self {
        Self {
            login_url: login_url.into(),
            callback_port,
            timeout: CALLBACK_TIMEOUT,
        }
    }

    /// Override the five-minute callback timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bind the callback server and build the authorize URL.
    ///
    /// Nothing is opened yet; the caller decides whether to launch a
    /// browser or print the URL.
    pub async fn start(&self) -> Result<PendingLogin, AuthError> {
        let server = CallbackServer::bind(self.callback_port).await?;
        let state = generate_state();
        let url = authorize_url(&self.login_url, &server.redirect_uri(), &state)?;
        Ok(PendingLogin {
            url,
            state,
            server,
            timeout: self.timeout,
        })
    }
}

/// A login whose callback server is listening.
#[derive(Debug)]
pub struct PendingLogin {
    url: Url,
    state: String,
    server: CallbackServer,
    timeout: Duration,
}

impl PendingLogin {
    /// URL the user must visit
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Launch the system browser at [`PendingLogin::url`]
    pub fn open_browser(&self) -> Result<(), AuthError> {
        tracing::info!("Opening browser for login");
        open::that(self.url.as_str())
            .map_err(|e| AuthError::Other(format!("Failed to open browser: {e}")))
    }

    /// Wait for the redirect and persist the token it carries
    pub async fn complete(self, tokens: &TokenStore) -> Result<(), AuthError> {
        let token = self.server.wait_for_token(&self.state, self.timeout).await?;
        tokens.save(&token)?;
        tracing::info!("Login completed");
        Ok(())
    }
}

/// 64 hex characters of CSRF state
fn generate_state() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn authorize_url(login_url: &str, redirect_uri: &str, state: &str) -> Result<Url, AuthError> {
    let mut url = Url::parse(login_url)
        .map_err(|e| AuthError::Other(format!("Invalid login URL '{login_url}': {e}")))?;
    url.query_pairs_mut()
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("state", state);
    Ok(url)
}
