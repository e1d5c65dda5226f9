//! Session credential payloads.

use crate::id::RecordId;
use serde::{Deserialize, Serialize};

/// Dashboard role. Only admins may manage users, officers and QRIS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
        }
    }
}

/// Cached user descriptor stored next to the bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: RecordId,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

impl UserInfo {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
}

/// Response of login and register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: UserInfo,
}

fn default_token_type() -> String {
    "bearer".to_string()
}
