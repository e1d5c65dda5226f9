//! Dashboard user accounts (admin-only resource).

use crate::auth::Role;
use crate::id::RecordId;
use serde::{Deserialize, Serialize};

/// Username of the account created when the backend is bootstrapped.
pub const BOOTSTRAP_ADMIN: &str = "admin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl User {
    /// The bootstrap admin must never be deleted from the dashboard.
    pub fn is_bootstrap_admin(&self) -> bool {
        self.username == BOOTSTRAP_ADMIN
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserDraft {
    pub username: String,
    pub name: String,
    pub role: Role,
    /// Write-only. Empty while editing means "keep the current password".
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&User> for UserDraft {
    fn from(r: &User) -> Self {
        Self {
            username: r.username.clone(),
            name: r.name.clone(),
            role: r.role,
            password: String::new(),
            is_active: Some(r.is_active),
        }
    }
}

impl From<UserDraft> for UserPatch {
    fn from(d: UserDraft) -> Self {
        Self {
            username: Some(d.username),
            name: Some(d.name),
            role: Some(d.role),
            password: Some(d.password).filter(|p| !p.is_empty()),
            is_active: d.is_active,
        }
    }
}
