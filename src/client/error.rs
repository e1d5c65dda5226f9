//! Errors surfaced by the API client.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::session::StorageError;

/// Fallback shown when no backend detail is available
pub const GENERIC_FAILURE: &str = "Terjadi kesalahan. Silakan coba lagi.";
const NETWORK_FAILURE: &str = "Gagal terhubung ke server. Periksa koneksi internet Anda.";
const SESSION_EXPIRED: &str = "Sesi Anda telah berakhir. Silakan login kembali.";
const ADMIN_REQUIRED: &str = "Akses ditolak. Tindakan ini hanya untuk admin.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response received (connection refused, DNS, TLS, ...)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unauthorized: {}", .detail.as_deref().unwrap_or("no detail"))]
    Unauthorized { detail: Option<String> },

    #[error("forbidden: {}", .detail.as_deref().unwrap_or("no detail"))]
    Forbidden { detail: Option<String> },

    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    #[error("malformed response body (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Client-side check failed; nothing was sent
    #[error("{0}")]
    Validation(String),

    #[error("invalid file: {0}")]
    InvalidFile(String),

    #[error("invalid API url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The credential could not be persisted after login
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Build the error for a non-2xx response from its status and raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = parse_detail(body);
        match status {
            401 => Self::Unauthorized { detail },
            403 => Self::Forbidden { detail },
            _ => Self::Status { status, detail },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::Status { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Validation(_) | Self::InvalidFile(_) | Self::InvalidUrl(_) | Self::Storage(_) => {
                None
            }
        }
    }

    /// Backend-provided detail message, when the response carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail } | Self::Forbidden { detail } | Self::Status { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    /// Notification text for the user: backend detail verbatim when present,
    /// otherwise a localized fallback per failure class.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => NETWORK_FAILURE.to_string(),
            Self::Unauthorized { detail } => {
                detail.clone().unwrap_or_else(|| SESSION_EXPIRED.to_string())
            }
            Self::Forbidden { detail } => match detail {
                Some(d) => format!("{} ({})", ADMIN_REQUIRED, d),
                None => ADMIN_REQUIRED.to_string(),
            },
            Self::Status { detail, .. } => {
                detail.clone().unwrap_or_else(|| GENERIC_FAILURE.to_string())
            }
            Self::Decode { .. } | Self::InvalidUrl(_) | Self::Storage(_) => {
                GENERIC_FAILURE.to_string()
            }
            Self::Validation(msg) | Self::InvalidFile(msg) => msg.clone(),
        }
    }
}

/// Error body shape: `{"detail": "..."}` or a list of validation items.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

fn parse_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(|m| m.as_str()).map(str::to_string),
                })
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        Value::Object(obj) => obj.get("msg").and_then(|m| m.as_str()).map(str::to_string),
        _ => None,
    }
}
