use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::errors::UselogError;

/// Kind of resource a log entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Equipment,
    Material,
}

impl ResourceType {
    pub const ALL: [ResourceType; 2] = [ResourceType::Equipment, ResourceType::Material];

    /// Wire value, as sent to and received from the API.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Equipment => "equipment",
            ResourceType::Material => "material",
        }
    }

    /// Label shown in the form prompts.
    pub fn label(self) -> &'static str {
        match self {
            ResourceType::Equipment => "设备",
            ResourceType::Material => "材料",
        }
    }
}

impl FromStr for ResourceType {
    type Err = UselogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rt| rt.as_str() == s.trim())
            .ok_or_else(|| UselogError::UnknownResourceType {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    StartUse,
    EndUse,
    Consume,
    Maintenance,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::StartUse,
        Action::EndUse,
        Action::Consume,
        Action::Maintenance,
    ];

    /// Wire value, as sent to and received from the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::StartUse => "start_use",
            Action::EndUse => "end_use",
            Action::Consume => "consume",
            Action::Maintenance => "maintenance",
        }
    }

    /// Label shown in the form prompts.
    pub fn label(self) -> &'static str {
        match self {
            Action::StartUse => "开始使用",
            Action::EndUse => "结束使用",
            Action::Consume => "消耗",
            Action::Maintenance => "维护",
        }
    }
}

impl FromStr for Action {
    type Err = UselogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s.trim())
            .ok_or_else(|| UselogError::UnknownAction {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A usage log as stored by the server.
///
/// `id`, `user_id` and `timestamp` are always server-assigned; the client
/// never fills them in. `timestamp` keeps the exact server text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLog {
    pub id: i64,
    pub user_id: Option<i64>,
    pub resource_type: ResourceType,
    pub resource_id: i64,
    pub action: Action,
    pub quantity_used: Option<f64>,
    pub duration_minutes: Option<i64>,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    pub issues_reported: Option<String>,
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub auto_recorded: bool,
    pub timestamp: String,
}

/// The server column is nullable; a missing or null flag reads as false.
fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Option::<bool>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Validated payload for `POST /api/logs/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUsageLog {
    pub resource_type: ResourceType,
    pub resource_id: i64,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_used: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues_reported: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    pub auto_recorded: bool,
}
