//! Cleanup service for the notification inbox
//!
//! Runs as a background task on startup, then periodically.
//! - Drops read notifications older than the retention window (and their replies)

use chrono::{Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time;

use crate::config::Config;
use crate::services::inbox::NotificationInbox;

/// Configuration for the cleanup service
pub struct CleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_secs: u64,
    /// Read notifications older than this are removed
    pub retention_hours: i64,
}

impl CleanupConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval_secs: config.notification_sweep_secs.max(1),
            retention_hours: config.notification_retention_hours.max(0),
        }
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    pub notifications_deleted: usize,
}

/// Run a single cleanup cycle
pub fn run_cleanup(inbox: &NotificationInbox, config: &CleanupConfig) -> CleanupResult {
    let cutoff = Utc::now() - ChronoDuration::hours(config.retention_hours);
    let deleted = inbox.prune_read_before(cutoff);

    if deleted > 0 {
        tracing::info!("Cleanup: deleted {} read notifications", deleted);
    }

    CleanupResult {
        notifications_deleted: deleted,
    }
}

/// Start the background cleanup task
///
/// Runs immediately on startup, then periodically at the configured interval.
/// This should be spawned as a background task using `tokio::spawn`.
pub async fn start_cleanup_task(inbox: Arc<NotificationInbox>, config: CleanupConfig) {
    tracing::info!(
        "Starting cleanup task (interval: {}s, retention: {}h)",
        config.interval_secs,
        config.retention_hours
    );

    // The first tick completes immediately
    let mut interval = time::interval(Duration::from_secs(config.interval_secs));

    loop {
        interval.tick().await;
        run_cleanup(&inbox, &config);
    }
}
