pub mod alert;
pub mod delivery;
mod error;
mod job_schedulers;
pub mod preference;
pub mod reminders;
mod shared;

pub use error::KlaxonError;
pub use job_schedulers::{start_reminder_scheduler, ReminderScheduler};
pub use shared::usecase::{execute, Subscriber, UseCase};

use klaxon_infra::KlaxonContext;
use tracing::info;

/// Process harness around the reminder scheduler. Embeds everything the
/// binary needs: construct it with a configured context, then `start`
/// blocks until shutdown.
pub struct Application {
    scheduler: ReminderScheduler,
}

impl Application {
    pub fn new(context: KlaxonContext) -> Self {
        Self {
            scheduler: start_reminder_scheduler(context),
        }
    }

    /// Runs until the process receives ctrl-c, then stops the scheduler.
    pub async fn start(self) -> anyhow::Result<()> {
        tokio::signal::ctrl_c().await?;
        info!("Shutdown signal received");
        self.scheduler.stop().await;
        Ok(())
    }

    /// Stops the scheduler without waiting for a signal.
    pub async fn stop(self) {
        self.scheduler.stop().await;
    }
}
