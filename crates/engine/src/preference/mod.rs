pub mod get_user_alerts;
pub mod mark_read;
pub mod mark_unread;
pub mod snooze_alert;
