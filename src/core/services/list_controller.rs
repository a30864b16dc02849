use tracing::debug;

use crate::core::errors::NOT_LOGGED_IN;
use crate::core::models::session::Session;
use crate::core::models::usage_log::UsageLog;
use crate::core::traits::log_api::LogApi;

/// Observable state of the log list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Ready(Vec<UsageLog>),
    Error(String),
}

/// Holds the fetched collection of logs.
///
/// The collection is only ever replaced by a fetch or grown at the front
/// by [`ListController::prepend`].
pub struct ListController<'a, A: LogApi> {
    api: &'a A,
    state: ListState,
}

impl<'a, A: LogApi> ListController<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            state: ListState::Loading,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// The held collection; empty unless the list is ready.
    pub fn records(&self) -> &[UsageLog] {
        match &self.state {
            ListState::Ready(logs) => logs,
            _ => &[],
        }
    }

    /// Error banner text, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Load (or reload) the collection. Without a session the list fails
    /// immediately and no request is made.
    pub fn mount(&mut self, session: Option<&Session>) {
        let Some(session) = session else {
            debug!("no session, skipping log fetch");
            self.state = ListState::Error(NOT_LOGGED_IN.to_string());
            return;
        };
        self.fetch(session);
    }

    /// Insert a freshly created record at the front.
    pub fn prepend(&mut self, record: UsageLog) {
        match &mut self.state {
            ListState::Ready(logs) => logs.insert(0, record),
            _ => self.state = ListState::Ready(vec![record]),
        }
    }

    fn fetch(&mut self, session: &Session) {
        self.state = ListState::Loading;
        self.state = match self.api.list_logs(session) {
            Ok(logs) => {
                debug!(count = logs.len(), "log list loaded");
                ListState::Ready(logs)
            }
            Err(e) => {
                debug!(error = %e, "log list fetch failed");
                ListState::Error(format!("获取日志失败: {e}"))
            }
        };
    }
}
