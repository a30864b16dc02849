use std::fmt;
use std::str::FromStr;

use crate::core::errors::UselogError;
use crate::core::models::usage_log::{Action, NewUsageLog, ResourceType};

/// Editable fields of the log form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ResourceType,
    ResourceId,
    Action,
    QuantityUsed,
    DurationMinutes,
    Purpose,
    Notes,
    IssuesReported,
    ProjectName,
    AutoRecorded,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Field; 10] = [
        Field::ResourceType,
        Field::ResourceId,
        Field::Action,
        Field::QuantityUsed,
        Field::DurationMinutes,
        Field::Purpose,
        Field::Notes,
        Field::IssuesReported,
        Field::ProjectName,
        Field::AutoRecorded,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::ResourceType => "resource_type",
            Field::ResourceId => "resource_id",
            Field::Action => "action",
            Field::QuantityUsed => "quantity_used",
            Field::DurationMinutes => "duration_minutes",
            Field::Purpose => "purpose",
            Field::Notes => "notes",
            Field::IssuesReported => "issues_reported",
            Field::ProjectName => "project_name",
            Field::AutoRecorded => "auto_recorded",
        }
    }

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            Field::ResourceType => "资源类型",
            Field::ResourceId => "资源ID",
            Field::Action => "操作类型",
            Field::QuantityUsed => "数量",
            Field::DurationMinutes => "使用时长(分钟)",
            Field::Purpose => "目的",
            Field::Notes => "备注",
            Field::IssuesReported => "问题反馈",
            Field::ProjectName => "项目名称",
            Field::AutoRecorded => "自动记录",
        }
    }
}

/// A validation failure attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.name(), self.message)
    }
}

/// Client-only, partially filled log entry.
///
/// Every value is kept as the text the user typed; nothing is parsed until
/// [`LogDraft::validate`]. A draft is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct LogDraft {
    pub resource_type: String,
    pub resource_id: String,
    pub action: String,
    pub quantity_used: String,
    pub duration_minutes: String,
    pub purpose: String,
    pub notes: String,
    pub issues_reported: String,
    pub project_name: String,
    pub auto_recorded: bool,
}

impl Default for LogDraft {
    fn default() -> Self {
        Self {
            resource_type: ResourceType::Equipment.as_str().to_string(),
            resource_id: String::new(),
            action: Action::StartUse.as_str().to_string(),
            quantity_used: String::new(),
            duration_minutes: String::new(),
            purpose: String::new(),
            notes: String::new(),
            issues_reported: String::new(),
            project_name: String::new(),
            auto_recorded: false,
        }
    }
}

impl LogDraft {
    /// Overwrite one field with user text.
    ///
    /// `auto_recorded` accepts the usual yes/no spellings; anything else
    /// leaves it unchecked.
    pub fn set(&mut self, field: Field, value: &str) {
        let value = value.to_string();
        match field {
            Field::ResourceType => self.resource_type = value,
            Field::ResourceId => self.resource_id = value,
            Field::Action => self.action = value,
            Field::QuantityUsed => self.quantity_used = value,
            Field::DurationMinutes => self.duration_minutes = value,
            Field::Purpose => self.purpose = value,
            Field::Notes => self.notes = value,
            Field::IssuesReported => self.issues_reported = value,
            Field::ProjectName => self.project_name = value,
            Field::AutoRecorded => {
                self.auto_recorded = matches!(
                    value.trim().to_lowercase().as_str(),
                    "y" | "yes" | "true" | "1" | "是"
                )
            }
        }
    }

    /// Current text of one field.
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::ResourceType => self.resource_type.clone(),
            Field::ResourceId => self.resource_id.clone(),
            Field::Action => self.action.clone(),
            Field::QuantityUsed => self.quantity_used.clone(),
            Field::DurationMinutes => self.duration_minutes.clone(),
            Field::Purpose => self.purpose.clone(),
            Field::Notes => self.notes.clone(),
            Field::IssuesReported => self.issues_reported.clone(),
            Field::ProjectName => self.project_name.clone(),
            Field::AutoRecorded => if self.auto_recorded { "是" } else { "否" }.to_string(),
        }
    }

    /// Restore the initial values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check every field and build the create payload.
    ///
    /// All failing fields are reported together, in form order.
    pub fn validate(&self) -> Result<NewUsageLog, Vec<FieldError>> {
        let mut errors = Vec::new();

        let resource_type = match required(&self.resource_type) {
            None => {
                errors.push(FieldError::new(Field::ResourceType, "请选择资源类型"));
                None
            }
            Some(v) => match ResourceType::from_str(v) {
                Ok(rt) => Some(rt),
                Err(e) => {
                    errors.push(FieldError::new(Field::ResourceType, e.to_string()));
                    None
                }
            },
        };

        let resource_id = match required(&self.resource_id) {
            None => {
                errors.push(FieldError::new(Field::ResourceId, "请输入资源ID"));
                None
            }
            Some(v) => match v.parse::<i64>() {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    errors.push(FieldError::new(Field::ResourceId, "资源ID必须为正整数"));
                    None
                }
            },
        };

        let action = match required(&self.action) {
            None => {
                errors.push(FieldError::new(Field::Action, "请选择操作类型"));
                None
            }
            Some(v) => match Action::from_str(v) {
                Ok(a) => Some(a),
                Err(e) => {
                    errors.push(FieldError::new(Field::Action, e.to_string()));
                    None
                }
            },
        };

        let quantity_used = match required(&self.quantity_used) {
            None => None,
            Some(v) => match v.parse::<f64>() {
                Ok(q) if !q.is_finite() => {
                    errors.push(FieldError::new(Field::QuantityUsed, "数量必须为数字"));
                    None
                }
                Ok(q) if q < 0.0 => {
                    errors.push(FieldError::new(Field::QuantityUsed, "数量不能为负数"));
                    None
                }
                Ok(q) => Some(q),
                Err(_) => {
                    errors.push(FieldError::new(Field::QuantityUsed, "数量必须为数字"));
                    None
                }
            },
        };

        let duration_minutes = match required(&self.duration_minutes) {
            None => None,
            Some(v) => match v.parse::<i64>() {
                Ok(d) if d < 0 => {
                    errors.push(FieldError::new(Field::DurationMinutes, "时长不能为负数"));
                    None
                }
                Ok(d) => Some(d),
                // "-1.5" is still negative, report that first
                Err(_) if v.parse::<f64>().is_ok_and(|d| d < 0.0) => {
                    errors.push(FieldError::new(Field::DurationMinutes, "时长不能为负数"));
                    None
                }
                Err(_) => {
                    errors.push(FieldError::new(Field::DurationMinutes, "时长必须为整数"));
                    None
                }
            },
        };

        match (resource_type, resource_id, action) {
            (Some(resource_type), Some(resource_id), Some(action)) if errors.is_empty() => {
                Ok(NewUsageLog {
                    resource_type,
                    resource_id,
                    action,
                    quantity_used,
                    duration_minutes,
                    purpose: optional_text(&self.purpose),
                    notes: optional_text(&self.notes),
                    issues_reported: optional_text(&self.issues_reported),
                    project_name: optional_text(&self.project_name),
                    auto_recorded: self.auto_recorded,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Trimmed value, or `None` when blank.
fn required(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

fn optional_text(value: &str) -> Option<String> {
    required(value).map(str::to_string)
}

impl From<Vec<FieldError>> for UselogError {
    fn from(fields: Vec<FieldError>) -> Self {
        UselogError::Validation { fields }
    }
}
