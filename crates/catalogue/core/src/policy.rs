//! Who may see the admin panel.

use catalogue_async::types::Role;

/// Environment switches that affect admin visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminEnvironment {
    /// Emails granted admin access regardless of role
    pub allow_list: Vec<String>,
    /// Development mode: everyone is an admin
    pub everyone_is_admin: bool,
}

impl AdminEnvironment {
    /// Build from the `admin` config section
    pub fn from_config(cfg: &catalogue_config::types::AdminConfig) -> Self {
        Self {
            allow_list: cfg.emails.clone(),
            everyone_is_admin: cfg.everyone_is_admin,
        }
    }
}

/// Roles that always see the admin panel.
pub const fn is_privileged(role: &Role) -> bool {
    matches!(role, Role::Admin | Role::SuperAdmin | Role::Moderator)
}

/// The single admin-visibility decision.
///
/// True when any of these holds: the role is privileged, the email is on the
/// allow-list (case-insensitive), the environment makes everyone an admin,
/// or the server said so.
pub fn can_administer(
    role: Option<&Role>,
    email: Option<&str>,
    env: &AdminEnvironment,
    server_flag: bool,
) -> bool {
    if env.everyone_is_admin || server_flag {
        return true;
    }
    if role.is_some_and(is_privileged) {
        return true;
    }
    email.is_some_and(|e| {
        let e = e.trim();
        env.allow_list
            .iter()
            .any(|allowed| allowed.trim().eq_ignore_ascii_case(e))
    })
}
