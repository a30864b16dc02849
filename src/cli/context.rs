use std::path::{Path, PathBuf};

use crate::adapters::http::rest_log_api::RestLogApi;
use crate::adapters::session::file_session_store::FileSessionStore;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::{Result, UselogError};
use crate::core::models::session::Session;
use crate::core::traits::session_store::SessionStore;

/// Everything a command needs, resolved once at startup.
///
/// The session is read here and handed down; commands never go back to
/// the store to look up the token.
pub struct AppContext {
    home: PathBuf,
    config: AppConfig,
    store: FileSessionStore,
    session: Option<Session>,
}

impl AppContext {
    /// Resolve the home directory, load the config and read the session.
    pub fn load(home: Option<&str>, api_url: Option<&str>) -> Result<Self> {
        let home = resolve_home(home)?;
        let mut config = AppConfig::load(&home)?;
        if let Some(url) = api_url {
            config = config.with_base_url(&home, url)?;
        }
        let store = FileSessionStore::new(config.session_path(&home));
        let session = match store.load() {
            Ok(session) => session,
            Err(e) => {
                output::warning(&format!("Ignoring unreadable session: {e}"));
                None
            }
        };
        tracing::debug!(
            home = %home.display(),
            base_url = %config.api.base_url,
            logged_in = session.is_some(),
            "context loaded"
        );
        Ok(Self {
            home,
            config,
            store,
            session,
        })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &FileSessionStore {
        &self.store
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Session, or `NotLoggedIn` for commands that cannot run without one.
    pub fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(UselogError::NotLoggedIn)
    }

    pub fn api(&self) -> RestLogApi {
        RestLogApi::new(&self.config.api)
    }
}

/// `custom` if given, otherwise `<config dir>/uselog`.
fn resolve_home(custom: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = custom.filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let config_dir = dirs::config_dir().ok_or_else(|| UselogError::InvalidConfig {
        home: PathBuf::from("~/.config/uselog"),
        detail: "Could not determine config directory; pass --home".into(),
    })?;
    Ok(config_dir.join("uselog"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_without_session() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = AppContext::load(tmp.path().to_str(), None).unwrap();
        assert!(ctx.session().is_none());
        assert!(matches!(
            ctx.require_session(),
            Err(UselogError::NotLoggedIn)
        ));
        assert_eq!(ctx.home(), tmp.path());
    }

    #[test]
    fn reads_session_once_at_load() {
        let tmp = tempfile::tempdir().unwrap();
        FileSessionStore::new(tmp.path().join("session.json"))
            .save(&Session::new("tok"))
            .unwrap();

        let ctx = AppContext::load(tmp.path().to_str(), None).unwrap();
        ctx.store().clear().unwrap();

        assert_eq!(ctx.session().map(|s| s.access_token.as_str()), Some("tok"));
    }

    #[test]
    fn unreadable_session_counts_as_logged_out() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("session.json"), "{broken").unwrap();

        let ctx = AppContext::load(tmp.path().to_str(), None).unwrap();
        assert!(ctx.session().is_none());
    }

    #[test]
    fn api_url_flag_overrides_config() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = AppContext::load(tmp.path().to_str(), Some("http://10.0.0.2:8000/api/logs"))
            .unwrap();
        assert_eq!(ctx.api().base_url(), "http://10.0.0.2:8000/api/logs/");
    }
}
