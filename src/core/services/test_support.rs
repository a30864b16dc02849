//! In-memory `LogApi` used by the controller tests.

use std::cell::{Cell, RefCell};

use crate::core::errors::{Result, UselogError};
use crate::core::models::session::Session;
use crate::core::models::usage_log::{Action, NewUsageLog, ResourceType, UsageLog};
use crate::core::traits::log_api::LogApi;

pub fn sample_log(id: i64) -> UsageLog {
    UsageLog {
        id,
        user_id: Some(1),
        resource_type: ResourceType::Equipment,
        resource_id: 5,
        action: Action::StartUse,
        quantity_used: None,
        duration_minutes: None,
        purpose: None,
        notes: None,
        issues_reported: None,
        project_name: None,
        auto_recorded: false,
        timestamp: format!("2024-01-0{id}T00:00:00Z"),
    }
}

#[derive(Default)]
pub struct FakeApi {
    logs: Vec<UsageLog>,
    list_error: RefCell<Option<UselogError>>,
    create_error: RefCell<Option<UselogError>>,
    list_calls: Cell<usize>,
    create_calls: Cell<usize>,
    last_payload: RefCell<Option<NewUsageLog>>,
}

impl FakeApi {
    pub fn with_logs(logs: Vec<UsageLog>) -> Self {
        Self {
            logs,
            ..Self::default()
        }
    }

    pub fn failing_list(err: UselogError) -> Self {
        Self {
            list_error: RefCell::new(Some(err)),
            ..Self::default()
        }
    }

    /// Make the next create call fail once.
    pub fn fail_next_create(&self, err: UselogError) {
        *self.create_error.borrow_mut() = Some(err);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.get()
    }

    pub fn last_payload(&self) -> Option<NewUsageLog> {
        self.last_payload.borrow().clone()
    }
}

impl LogApi for FakeApi {
    fn list_logs(&self, _session: &Session) -> Result<Vec<UsageLog>> {
        self.list_calls.set(self.list_calls.get() + 1);
        match self.list_error.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(self.logs.clone()),
        }
    }

    fn create_log(&self, _session: &Session, log: &NewUsageLog) -> Result<UsageLog> {
        self.create_calls.set(self.create_calls.get() + 1);
        *self.last_payload.borrow_mut() = Some(log.clone());
        if let Some(err) = self.create_error.borrow_mut().take() {
            return Err(err);
        }
        Ok(UsageLog {
            id: 100 + self.create_calls.get() as i64,
            user_id: Some(9),
            resource_type: log.resource_type,
            resource_id: log.resource_id,
            action: log.action,
            quantity_used: log.quantity_used,
            duration_minutes: log.duration_minutes,
            purpose: log.purpose.clone(),
            notes: log.notes.clone(),
            issues_reported: log.issues_reported.clone(),
            project_name: log.project_name.clone(),
            auto_recorded: log.auto_recorded,
            timestamp: "2024-01-02T00:00:00Z".to_string(),
        })
    }

    fn get_log(&self, _session: &Session, id: i64) -> Result<UsageLog> {
        self.logs
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| UselogError::ServerRejected {
                status: 404,
                detail: "日志不存在".into(),
            })
    }

    fn delete_log(&self, session: &Session, id: i64) -> Result<UsageLog> {
        self.get_log(session, id)
    }
}
