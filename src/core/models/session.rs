use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated session for the current user.
///
/// Read once at startup and passed to whatever needs it; nothing reads the
/// token ambiently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            saved_at: Some(Utc::now()),
        }
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}
