pub mod archive_alert;
pub mod create_alert;
pub mod list_alerts;
pub mod send_alert_reminder;
mod subscribers;
pub mod update_alert;
