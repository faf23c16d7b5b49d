mod alert;
pub mod date;
mod delivery;
mod notification;
mod preference;
mod shared;
mod team;
mod user;
pub mod visibility;

pub use alert::{
    Alert, ChannelKind, LifecycleState, Severity, VisibilityRule, DEFAULT_REMINDER_INTERVAL,
};
pub use delivery::{DeliveryOutcome, DeliveryRecord};
pub use notification::{InboxNotification, RenderedMessage};
pub use preference::AlertPreference;
pub use shared::entity::{Entity, ID};
pub use team::Team;
pub use user::User;
