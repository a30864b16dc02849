use tracing::debug;

use crate::core::errors::{NOT_LOGGED_IN, Result, UselogError};
use crate::core::models::draft::{Field, FieldError, LogDraft};
use crate::core::models::session::Session;
use crate::core::models::usage_log::UsageLog;
use crate::core::services::list_controller::ListController;
use crate::core::traits::log_api::LogApi;

/// Observable state of the log form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Idle,
    Submitting,
    Error(String),
}

/// Owns the draft and drives a submission through the API.
pub struct FormController<'a, A: LogApi> {
    api: &'a A,
    draft: LogDraft,
    state: FormState,
    field_errors: Vec<FieldError>,
}

impl<'a, A: LogApi> FormController<'a, A> {
    #[cfg(test)]
    pub fn new(api: &'a A) -> Self {
        Self::with_draft(api, LogDraft::default())
    }

    pub fn with_draft(api: &'a A, draft: LogDraft) -> Self {
        Self {
            api,
            draft,
            state: FormState::Idle,
            field_errors: Vec::new(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn draft(&self) -> &LogDraft {
        &self.draft
    }

    /// Errors from the last local validation, in form order.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn set_field(&mut self, field: Field, value: &str) {
        self.draft.set(field, value);
    }

    /// Validate the draft and, if it passes, create the log.
    ///
    /// On success the draft is reset and the server's record is handed to
    /// `list`. On a server or transport failure the draft is kept so the
    /// same input can be submitted again.
    ///
    /// Taking `&mut self` keeps one submission in flight at a time; the
    /// form sits in `Submitting` only for the duration of the API call.
    pub fn submit(
        &mut self,
        session: Option<&Session>,
        list: &mut ListController<'_, A>,
    ) -> Result<UsageLog> {
        let payload = match self.draft.validate() {
            Ok(payload) => {
                self.field_errors.clear();
                payload
            }
            Err(errors) => {
                debug!(count = errors.len(), "draft failed validation");
                self.field_errors = errors.clone();
                self.state = FormState::Idle;
                return Err(errors.into());
            }
        };

        let Some(session) = session else {
            self.state = FormState::Error(format!("提交失败: {NOT_LOGGED_IN}"));
            return Err(UselogError::NotLoggedIn);
        };

        debug!(resource_id = payload.resource_id, "submitting usage log");
        self.state = FormState::Submitting;

        match self.api.create_log(session, &payload) {
            Ok(record) => {
                debug!(id = record.id, "usage log created");
                self.draft.reset();
                self.state = FormState::Idle;
                list.prepend(record.clone());
                Ok(record)
            }
            Err(e) => {
                debug!(error = %e, "usage log submission failed");
                self.state = FormState::Error(format!("提交失败: {e}"));
                Err(e)
            }
        }
    }
}
