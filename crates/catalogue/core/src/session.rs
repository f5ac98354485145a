//! Who is signed in, resolved once and passed around explicitly.

use crate::{
    CoreError,
    policy::{AdminEnvironment, can_administer},
};
use catalogue_async::{
    Client, CatalogueError,
    config::Config,
    types::{Role, User},
};
use catalogue_auth::TokenStore;

/// The signed-in user and what they may do.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    /// Current user
    pub user: User,
    /// Admin panel visibility, decided by [`can_administer`]
    pub is_admin: bool,
    /// True when authentication was skipped for development
    pub bypassed: bool,
}

/// Authentication state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Not resolved yet
    #[default]
    Checking,
    /// A user is signed in
    Authenticated(SessionContext),
    /// No valid token
    Unauthenticated,
}

impl SessionState {
    /// The session context, when signed in
    pub const fn context(&self) -> Option<&SessionContext> {
        match self {
            Self::Authenticated(ctx) => Some(ctx),
            Self::Checking | Self::Unauthenticated => None,
        }
    }
}

/// Inputs that decide how a session is resolved.
#[derive(Debug, Clone, Default)]
pub struct SessionSettings {
    /// Admin allow-list and development switch
    pub admin: AdminEnvironment,
    /// Skip authentication entirely
    pub dev_bypass: bool,
}

/// The stand-in user for development bypass mode.
pub fn synthetic_admin() -> User {
    User {
        user_id: 0,
        first_name: "Dev".into(),
        last_name: "User".into(),
        email: "dev@localhost".into(),
        active: true,
        updated_by: None,
        team_name: "development".into(),
        role_name: Role::Admin,
        access_list: None,
    }
}

/// Resolve the session against the API.
///
/// - bypass: authenticated as [`synthetic_admin`] without any request
/// - no token: unauthenticated without any request
/// - `GET /api/users/me` succeeds: authenticated
/// - 401: unauthenticated (the client has already evicted the token)
///
/// Any other failure is returned as an error.
pub async fn resolve<C: Config>(
    client: &Client<C>,
    settings: &SessionSettings,
) -> Result<SessionState, CoreError> {
    if settings.dev_bypass {
        tracing::info!("Authentication bypassed for development");
        return Ok(SessionState::Authenticated(SessionContext {
            user: synthetic_admin(),
            is_admin: true,
            bypassed: true,
        }));
    }

    if !client.config().has_credentials() {
        return Ok(SessionState::Unauthenticated);
    }

    let user = match client.users().me().await {
        Ok(user) => user,
        Err(CatalogueError::Unauthorized) => return Ok(SessionState::Unauthenticated),
        Err(e) => return Err(e.into()),
    };

    let server_flag = server_admin_flag(client).await;
    let is_admin = can_administer(
        Some(&user.role_name),
        Some(&user.email),
        &settings.admin,
        server_flag,
    );

    Ok(SessionState::Authenticated(SessionContext {
        user,
        is_admin,
        bypassed: false,
    }))
}

/// The server's admin answer; any failure counts as "no".
pub async fn server_admin_flag<C: Config>(client: &Client<C>) -> bool {
    match client.admins().is_admin().await {
        Ok(check) => check.is_admin,
        Err(e) => {
            tracing::debug!("Admin check failed, treating as non-admin: {e}");
            false
        }
    }
}

/// Forget the stored token.
pub fn logout(tokens: &TokenStore) -> Result<SessionState, CoreError> {
    tokens.clear()?;
    tracing::info!("Logged out");
    Ok(SessionState::Unauthenticated)
}
