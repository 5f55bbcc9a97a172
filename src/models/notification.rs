use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of admin-facing event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    IssueReport,
    MovieRequest,
    NewUser,
    SystemAlert,
}

impl NotificationType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "issue_report" => Some(Self::IssueReport),
            "movie_request" => Some(Self::MovieRequest),
            "new_user" => Some(Self::NewUser),
            "system_alert" => Some(Self::SystemAlert),
            _ => None,
        }
    }
}

/// Stored inbox entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// Admin reply linked to a notification
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationReply {
    pub id: Uuid,
    pub notification_id: Uuid,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub admin_reply: bool,
}

/// Inbox preferences; a disabled type is accepted but not stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    #[serde(default = "enabled")]
    pub email_notifications: bool,
    #[serde(default = "enabled")]
    pub push_notifications: bool,
    #[serde(default = "enabled")]
    pub issue_reports: bool,
    #[serde(default = "enabled")]
    pub movie_requests: bool,
    #[serde(default = "enabled")]
    pub system_alerts: bool,
}

fn enabled() -> bool {
    true
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: true,
            issue_reports: true,
            movie_requests: true,
            system_alerts: true,
        }
    }
}

impl NotificationSettings {
    pub fn accepts(&self, kind: NotificationType) -> bool {
        match kind {
            NotificationType::IssueReport => self.issue_reports,
            NotificationType::MovieRequest => self.movie_requests,
            NotificationType::SystemAlert => self.system_alerts,
            NotificationType::NewUser => true,
        }
    }
}

/// Body of POST /admin/notifications
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewNotification {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Body of POST /admin/notifications/reply
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub notification_id: Option<String>,
    pub message: Option<String>,
}
