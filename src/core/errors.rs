use std::path::PathBuf;

use crate::core::models::draft::FieldError;

/// Message shown whenever an operation needs a token and none is stored.
pub const NOT_LOGGED_IN: &str = "未检测到登录信息，请先登录。";

/// All domain errors for uselog.
///
/// Each variant provides enough context to tell the user what to do next
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum UselogError {
    #[error(
        "{}\n\n  \
         Store a token first: uselog login --token <token>",
        NOT_LOGGED_IN
    )]
    NotLoggedIn,

    #[error("{detail}")]
    Unauthorized { detail: String },

    #[error("{}", format_field_errors(.fields))]
    Validation { fields: Vec<FieldError> },

    #[error("{detail}")]
    ServerRejected { status: u16, detail: String },

    #[error("{reason}")]
    Network { reason: String },

    #[error("Invalid response from server: {detail}")]
    InvalidResponse { detail: String },

    #[error("Unknown resource type '{value}' (expected: equipment, material)")]
    UnknownResourceType { value: String },

    #[error("Unknown action '{value}' (expected: start_use, end_use, consume, maintenance)")]
    UnknownAction { value: String },

    #[error("{message}")]
    SubmitFailed { message: String },

    #[error(
        "Invalid configuration: {detail}\n\n  \
         Check {}/config.toml or pass --api-url.",
        .home.display()
    )]
    InvalidConfig { home: PathBuf, detail: String },

    #[error("Session file error: {detail}")]
    SessionError { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl UselogError {
    /// True for failures caused by a missing or rejected token.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::NotLoggedIn | Self::Unauthorized { .. })
    }
}

fn format_field_errors(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, UselogError>;
