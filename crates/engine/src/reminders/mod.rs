pub(crate) mod dispatch;
pub mod process_reminders;

pub use dispatch::AlertDeliveryReport;
