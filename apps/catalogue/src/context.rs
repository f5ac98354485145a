//! Everything a command needs: settings, token store, API client.

use anyhow::{Context, Result};
use catalogue_async::{CatalogueConfig, Client, CredentialSource, config::Config as _};
use catalogue_auth::{KeyringStore, SecureStore, TokenStore, XdgFileStore};
use catalogue_config::{CatalogueSettings, TokenStoreKind, load_merged};
use catalogue_core::{
    AdminEnvironment, CatalogueController, SearchOptions, SessionContext, SessionSettings,
    SessionState, session,
};
use colored::Colorize;
use secrecy::SecretString;
use std::{sync::Arc, time::Duration};

/// Keyring service name and data directory name
pub const APP_NAME: &str = "catalogue";

/// No usable session; the caller shows the login screen.
#[derive(Debug, thiserror::Error)]
#[error("login required")]
pub struct LoginRequired;

/// Loaded once per invocation.
pub struct AppContext {
    /// Merged settings
    pub settings: CatalogueSettings,
    /// Persistent token storage
    pub tokens: TokenStore,
    /// API client whose credentials come from `tokens` (or the env token)
    pub client: Client<CatalogueConfig>,
    /// `--json` was given
    pub json: bool,
}

impl AppContext {
    /// Load config from the current directory and wire up the client.
    pub fn load(api_base: Option<&str>, json: bool) -> Result<Self> {
        let dir = std::env::current_dir()?;
        let loaded = load_merged(&dir)?;
        for warning in &loaded.warnings {
            eprintln!("{} {warning}", "WARN".yellow());
        }

        let mut settings = loaded.config;
        if let Some(base) = api_base {
            settings.api.base_url = base.to_string();
        }

        let tokens = TokenStore::new(open_store(settings.auth.store)?);
        let credentials: Arc<dyn CredentialSource> = match &settings.api.token {
            Some(token) => Arc::new(EnvToken(token.clone())),
            None => Arc::new(tokens.clone()),
        };

        let client = Client::with_config(
            CatalogueConfig::new()
                .with_api_base(settings.api.base_url.clone())
                .with_credentials(credentials),
        )
        .with_timeout(Duration::from_secs(settings.api.timeout_secs.max(1)));

        Ok(Self {
            settings,
            tokens,
            client,
            json,
        })
    }

    /// Token used to decorate tool links
    pub fn link_token(&self) -> Option<SecretString> {
        if !self.client.config().has_credentials() {
            return None;
        }
        self.settings
            .api
            .token
            .clone()
            .or_else(|| self.tokens.load().ok().flatten())
    }

    fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            admin: AdminEnvironment::from_config(&self.settings.admin),
            dev_bypass: self.settings.auth.dev_bypass,
        }
    }

    /// Resolve the session without failing when signed out
    pub async fn session(&self) -> Result<SessionState> {
        Ok(session::resolve(&self.client, &self.session_settings()).await?)
    }

    /// Resolve the session, failing with [`LoginRequired`] when signed out
    pub async fn require_session(&self) -> Result<SessionContext> {
        match self.session().await? {
            SessionState::Authenticated(ctx) => Ok(ctx),
            SessionState::Checking | SessionState::Unauthenticated => Err(LoginRequired.into()),
        }
    }

    /// Signed-in controller with the catalogue loaded
    pub async fn controller(&self) -> Result<(CatalogueController<CatalogueConfig>, SessionContext)> {
        let session = self.require_session().await?;
        let mut ctrl = CatalogueController::new(
            self.client.clone(),
            SearchOptions::from_config(&self.settings.search),
            AdminEnvironment::from_config(&self.settings.admin),
        );
        ctrl.load(Some(&session))
            .await
            .context("Failed to load the catalogue")?;
        Ok((ctrl, session))
    }
}

fn open_store(kind: TokenStoreKind) -> Result<Arc<dyn SecureStore>> {
    Ok(match kind {
        TokenStoreKind::Keyring => Arc::new(KeyringStore::new(APP_NAME)),
        TokenStoreKind::File => {
            Arc::new(XdgFileStore::new(APP_NAME).context("Failed to open token file store")?)
        }
    })
}

/// Token from `CATALOGUE_TOKEN`; a 401 cannot evict it, only report it.
#[derive(Debug)]
struct EnvToken(SecretString);

impl CredentialSource for EnvToken {
    fn bearer_token(&self) -> Option<SecretString> {
        Some(self.0.clone())
    }

    fn evict(&self) {
        tracing::warn!("Server rejected the token from CATALOGUE_TOKEN");
    }
}
