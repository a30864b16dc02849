use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::app_config::ApiConfig;
use crate::core::errors::{Result, UselogError};
use crate::core::models::session::Session;
use crate::core::models::usage_log::{NewUsageLog, UsageLog};
use crate::core::traits::log_api::LogApi;

/// `LogApi` over the REST endpoint at `base_url` (`.../api/logs/`).
///
/// Calls are blocking: each one runs on its own current-thread runtime.
pub struct RestLogApi {
    base_url: String,
    timeout: Duration,
}

impl RestLogApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn record_url(&self, id: i64) -> String {
        format!("{}{id}", self.base_url)
    }

    fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(format!("uselog/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UselogError::Network {
                reason: format!("Failed to create HTTP client: {e}"),
            })
    }

    /// Send one authenticated request and decode a JSON response.
    fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        session: &Session,
        body: Option<&NewUsageLog>,
    ) -> Result<T> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| UselogError::Network {
                reason: format!("Failed to create async runtime: {e}"),
            })?;

        rt.block_on(async {
            let client = self.build_client()?;
            debug!(%method, url, "sending request");

            let mut request = client
                .request(method.clone(), url)
                .header(AUTHORIZATION, session.bearer());
            if let Some(body) = body {
                request = request.json(body);
            }

            let resp = request.send().await.map_err(|e| UselogError::Network {
                reason: e.to_string(),
            })?;
            let status = resp.status();
            let bytes = resp.bytes().await.map_err(|e| UselogError::Network {
                reason: format!("Failed to read response: {e}"),
            })?;
            debug!(%method, url, status = status.as_u16(), "response received");

            if !status.is_success() {
                return Err(error_for_status(status, &bytes));
            }

            serde_json::from_slice(&bytes).map_err(|e| UselogError::InvalidResponse {
                detail: e.to_string(),
            })
        })
    }
}

impl LogApi for RestLogApi {
    fn list_logs(&self, session: &Session) -> Result<Vec<UsageLog>> {
        self.execute(Method::GET, &self.base_url, session, None)
    }

    fn create_log(&self, session: &Session, log: &NewUsageLog) -> Result<UsageLog> {
        self.execute(Method::POST, &self.base_url, session, Some(log))
    }

    fn get_log(&self, session: &Session, id: i64) -> Result<UsageLog> {
        self.execute(Method::GET, &self.record_url(id), session, None)
    }

    fn delete_log(&self, session: &Session, id: i64) -> Result<UsageLog> {
        self.execute(Method::DELETE, &self.record_url(id), session, None)
    }
}

/// Map a non-2xx response to the error taxonomy, preferring the server's
/// `detail` text over the HTTP reason phrase.
fn error_for_status(status: StatusCode, body: &[u8]) -> UselogError {
    let detail = extract_detail(body).unwrap_or_else(|| format!("HTTP {status}"));
    match status.as_u16() {
        401 | 403 => UselogError::Unauthorized { detail },
        400..=499 => UselogError::ServerRejected {
            status: status.as_u16(),
            detail,
        },
        _ => UselogError::Network { reason: detail },
    }
}

/// Pull a readable message out of `{"detail": ...}`.
///
/// Request validation errors arrive as a list of `{loc, msg}` objects and
/// are flattened to `field: msg; field: msg`.
fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(format_validation_item).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

fn format_validation_item(item: &Value) -> Option<String> {
    let msg = item.get("msg")?.as_str()?;
    let loc: Vec<String> = item
        .get("loc")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter(|p| p.as_str() != Some("body"))
                .map(|p| match p {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    if loc.is_empty() {
        Some(msg.to_string())
    } else {
        Some(format!("{}: {msg}", loc.join(".")))
    }
}
