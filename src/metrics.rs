//! Process-wide Prometheus counters, exported by GET /metrics

use lazy_static::lazy_static;
use prometheus::{register_int_counter, IntCounter};

lazy_static! {
    pub static ref CONTENT_CREATED: IntCounter = register_int_counter!(
        "catalog_content_created_total",
        "Catalog records created"
    )
    .unwrap();
    pub static ref CONTENT_UPDATED: IntCounter = register_int_counter!(
        "catalog_content_updated_total",
        "Catalog record updates, including toggles and episode changes"
    )
    .unwrap();
    pub static ref CONTENT_DELETED: IntCounter = register_int_counter!(
        "catalog_content_deleted_total",
        "Catalog records deleted"
    )
    .unwrap();
    pub static ref DOWNLOADS_RECORDED: IntCounter = register_int_counter!(
        "catalog_downloads_recorded_total",
        "Downloads recorded across all records"
    )
    .unwrap();
    pub static ref NOTIFICATIONS_RECEIVED: IntCounter = register_int_counter!(
        "catalog_notifications_received_total",
        "Notifications submitted to the admin inbox"
    )
    .unwrap();
}
