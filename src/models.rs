use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Normalize a user-typed enum value: `in-progress`, `In Progress` and
/// `IN_PROGRESS` all map to `IN_PROGRESS`.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Client,
    Operator,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Operator => "OPERATOR",
            Role::Admin => "ADMIN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Client => "User",
            Role::Operator => "Operator",
            Role::Admin => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        match Priority::ALL.into_iter().find(|p| p.as_str() == wanted) {
            Some(p) => Ok(p),
            None => bail!(
                "Invalid priority '{}'. Must be one of: low, medium, high, critical",
                s
            ),
        }
    }
}

/// Ticket lifecycle status.
///
/// The usual flow is NEW -> IN_PROGRESS -> NEED_INFO -> CLOSED, with REJECTED
/// reachable early on. The client never enforces it: any role allowed to
/// change status may set any value, and the server decides what is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    New,
    InProgress,
    NeedInfo,
    Closed,
    Rejected,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::New,
        Status::InProgress,
        Status::NeedInfo,
        Status::Closed,
        Status::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::New => "NEW",
            Status::InProgress => "IN_PROGRESS",
            Status::NeedInfo => "NEED_INFO",
            Status::Closed => "CLOSED",
            Status::Rejected => "REJECTED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::New => "New",
            Status::InProgress => "In progress",
            Status::NeedInfo => "Needs info",
            Status::Closed => "Closed",
            Status::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Closed | Status::Rejected)
    }

    /// Display hint only; see the type docs.
    pub fn suggested_next(self) -> &'static [Status] {
        match self {
            Status::New => &[Status::InProgress, Status::Rejected],
            Status::InProgress => &[Status::NeedInfo, Status::Closed, Status::Rejected],
            Status::NeedInfo => &[Status::Closed],
            Status::Closed | Status::Rejected => &[],
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        match Status::ALL.into_iter().find(|st| st.as_str() == wanted) {
            Some(st) => Ok(st),
            None => bail!(
                "Invalid status '{}'. Must be one of: {}",
                s,
                Status::ALL.map(Status::as_str).join(", ")
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    StatusChanged,
    CommentAdded,
    Assigned,
    TicketCreated,
    Readed,
}

impl NotificationType {
    pub fn label(self) -> &'static str {
        match self {
            NotificationType::StatusChanged => "Ticket status changed",
            NotificationType::CommentAdded => "New comment",
            NotificationType::Assigned => "Assignee set",
            NotificationType::TicketCreated => "Ticket",
            NotificationType::Readed => "Ticket was read",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Authenticated identity: the bearer token plus the cached user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Body of a successful `/users/login` or `/users/register` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial profile update; the password is only sent when it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: i64,
    pub file_name: String,
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub priority: Priority,
    pub status: Status,
    #[serde(default)]
    pub assigned_to_id: Option<i64>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub category: Option<Category>,
}

/// Validated payload for `POST /tickets/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub category_id: i64,
    pub priority: Priority,
    pub incident_date: Option<NaiveDate>,
    pub files: Vec<PathBuf>,
}

impl NewTicket {
    /// Text parts of the multipart body, in submission order. Empty values
    /// are left out; priority always has a value.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if !self.title.is_empty() {
            fields.push(("title", self.title.clone()));
        }
        if !self.description.is_empty() {
            fields.push(("description", self.description.clone()));
        }
        fields.push(("categoryId", self.category_id.to_string()));
        fields.push(("priority", self.priority.as_str().to_string()));
        if let Some(date) = self.incident_date {
            fields.push(("incidentDate", date.format("%Y-%m-%d").to_string()));
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub ticket_id: i64,
    #[serde(default)]
    pub is_internal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    pub ticket_id: i64,
    pub is_internal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnreadCount {
    #[serde(default)]
    pub count: u64,
}
