//! Current-user and admin-check types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role assigned to a user by the access service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Full administrator
    Admin,
    /// Administrator across all teams
    SuperAdmin,
    /// Content moderator
    Moderator,
    /// Owner of a team
    TeamOwner,
    /// Regular team member
    TeamMember,
    /// Any role name this client does not know about
    Other(String),
}

impl Role {
    /// Wire name of the role
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "ADMIN",
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Moderator => "MODERATOR",
            Self::TeamOwner => "TEAM_OWNER",
            Self::TeamMember => "TEAM_MEMBER",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Self::Admin,
            "SUPER_ADMIN" => Self::SuperAdmin,
            "MODERATOR" => Self::Moderator,
            "TEAM_OWNER" => Self::TeamOwner,
            "TEAM_MEMBER" => Self::TeamMember,
            _ => Self::Other(s),
        }
    }
}

impl From<Role> for String {
    fn from(r: Role) -> Self {
        r.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user as reported by `GET /api/users/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Numeric user id
    pub user_id: i64,
    /// Given name
    #[serde(default)]
    pub first_name: String,
    /// Family name
    #[serde(default)]
    pub last_name: String,
    /// Login email
    pub email: String,
    /// Whether the account is enabled
    #[serde(default = "default_true")]
    pub active: bool,
    /// Id of the user who last modified this account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<i64>,
    /// Team the user belongs to
    #[serde(default)]
    pub team_name: String,
    /// Role that drives admin visibility
    pub role_name: Role,
    /// Per-resource permissions
    #[serde(
        rename = "accessList",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_list: Option<BTreeMap<String, Vec<String>>>,
}

const fn default_true() -> bool {
    true
}

impl User {
    /// "First Last", trimmed
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Response of `GET /api/admins/is-admin`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCheck {
    /// Whether the caller is listed as an admin on the server
    pub is_admin: bool,
    /// Email the server resolved for the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
