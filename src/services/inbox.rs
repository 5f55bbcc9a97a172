//! Admin notification inbox
//!
//! Non-durable, bounded mailbox of issue reports, movie requests and system
//! events. One inbox is created per process and handed to the router through
//! `AppState`; it is drained on shutdown.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::info;
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::metrics;
use crate::models::{
    NewNotification, Notification, NotificationReply, NotificationSettings, NotificationType,
    ReplyRequest,
};

/// Outcome of a submission
#[derive(Debug, Clone)]
pub enum Submission {
    Stored(Notification),
    /// Accepted, but its type is switched off in the settings
    Muted(NotificationType),
}

/// Inbox contents, newest first
#[derive(Debug, Clone, Serialize)]
pub struct InboxListing {
    pub notifications: Vec<Notification>,
    pub total: usize,
    pub unread: usize,
}

#[derive(Default)]
struct InboxState {
    /// Oldest at the front
    notifications: VecDeque<Notification>,
    replies: Vec<NotificationReply>,
    settings: NotificationSettings,
}

impl InboxState {
    fn position(&self, id: Uuid) -> Option<usize> {
        self.notifications.iter().position(|n| n.id == id)
    }

    fn forget_replies(&mut self, notification_id: Uuid) {
        self.replies.retain(|r| r.notification_id != notification_id);
    }
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|_| CatalogError::not_found("Notification"))
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CatalogError::validation(format!("{} is required", field))),
    }
}

pub struct NotificationInbox {
    state: RwLock<InboxState>,
    capacity: usize,
}

impl NotificationInbox {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: RwLock::new(InboxState::default()),
            capacity: capacity.max(1),
        }
    }

    /// Append a notification, evicting the oldest entries beyond capacity
    pub fn submit(&self, input: NewNotification) -> Result<Submission> {
        let kind_text = required(input.kind, "type")?;
        let kind = NotificationType::parse(&kind_text)
            .ok_or_else(|| CatalogError::validation(format!("Unknown notification type: {}", kind_text)))?;
        let title = required(input.title, "title")?;
        let message = required(input.message, "message")?;

        metrics::NOTIFICATIONS_RECEIVED.inc();

        let mut state = self.state.write();
        if !state.settings.accepts(kind) {
            info!("Notification of muted type {:?} dropped: {}", kind, title);
            return Ok(Submission::Muted(kind));
        }

        let notification = Notification {
            id: Uuid::new_v4(),
            kind,
            title,
            message,
            data: input.data,
            timestamp: Utc::now(),
            read: false,
        };

        state.notifications.push_back(notification.clone());
        while state.notifications.len() > self.capacity {
            if let Some(evicted) = state.notifications.pop_front() {
                state.forget_replies(evicted.id);
            }
        }

        info!(
            "New notification {} ({:?}): {}",
            notification.id, notification.kind, notification.title
        );

        Ok(Submission::Stored(notification))
    }

    pub fn list(&self) -> InboxListing {
        let state = self.state.read();
        let mut notifications: Vec<Notification> = state.notifications.iter().rev().cloned().collect();
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let unread = notifications.iter().filter(|n| !n.read).count();

        InboxListing {
            total: notifications.len(),
            unread,
            notifications,
        }
    }

    pub fn mark_read(&self, id: &str) -> Result<Notification> {
        let id = parse_id(id)?;
        let mut state = self.state.write();
        let index = state
            .position(id)
            .ok_or_else(|| CatalogError::not_found("Notification"))?;

        let notification = &mut state.notifications[index];
        notification.read = true;
        Ok(notification.clone())
    }

    /// Delete a notification together with its replies
    pub fn delete(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;
        let mut state = self.state.write();
        let index = state
            .position(id)
            .ok_or_else(|| CatalogError::not_found("Notification"))?;

        state.notifications.remove(index);
        state.forget_replies(id);

        info!("Notification {} deleted", id);
        Ok(())
    }

    /// Record an admin reply. Delivery to the submitter is only logged.
    pub fn reply(&self, request: ReplyRequest) -> Result<NotificationReply> {
        let notification_id = parse_id(&required(request.notification_id, "notificationId")?)?;
        let message = required(request.message, "message")?;

        let mut state = self.state.write();
        let index = state
            .position(notification_id)
            .ok_or_else(|| CatalogError::not_found("Notification"))?;
        let notification = &state.notifications[index];

        let recipient = notification
            .data
            .pointer("/user/email")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let subject = format!("Re: {}", notification.title);

        let reply = NotificationReply {
            id: Uuid::new_v4(),
            notification_id,
            message,
            timestamp: Utc::now(),
            admin_reply: true,
        };
        state.replies.push(reply.clone());

        let email_enabled = state.settings.email_notifications;
        drop(state);

        info!(
            reply_id = %reply.id,
            to = recipient.as_deref().unwrap_or("unknown"),
            subject = %subject,
            email_enabled,
            "Reply email queued (delivery stubbed)"
        );

        Ok(reply)
    }

    /// Replies to a notification, oldest first
    pub fn replies(&self, id: &str) -> Result<Vec<NotificationReply>> {
        let id = parse_id(id)?;
        let state = self.state.read();
        if state.position(id).is_none() {
            return Err(CatalogError::not_found("Notification"));
        }

        Ok(state
            .replies
            .iter()
            .filter(|r| r.notification_id == id)
            .cloned()
            .collect())
    }

    pub fn settings(&self) -> NotificationSettings {
        self.state.read().settings
    }

    pub fn update_settings(&self, settings: NotificationSettings) -> NotificationSettings {
        self.state.write().settings = settings;
        info!("Notification settings updated: {:?}", settings);
        settings
    }

    /// Drop read notifications older than `cutoff`, returning how many went
    pub fn prune_read_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut state = self.state.write();

        let (expired, kept): (Vec<Notification>, Vec<Notification>) = state
            .notifications
            .drain(..)
            .partition(|n| n.read && n.timestamp < cutoff);
        state.notifications = kept.into();

        for notification in &expired {
            state.forget_replies(notification.id);
        }

        expired.len()
    }

    /// Empty the inbox, returning everything that was in it
    pub fn drain(&self) -> Vec<Notification> {
        let mut state = self.state.write();
        state.replies.clear();
        state.notifications.drain(..).collect()
    }
}
