use crate::reminders::process_reminders::ProcessRemindersUseCase;
use crate::shared::usecase::execute;
use klaxon_infra::KlaxonContext;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, warn};

/// Handle to the periodic reminder loop. Dropping it does not stop the
/// loop, call `stop`.
pub struct ReminderScheduler {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ReminderScheduler {
    /// Signals the loop to exit and waits for it. A tick that is already
    /// running finishes on the runtime, no new ticks start.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}

/// Spawns the reminder tick loop. The first tick runs right away, then
/// every `reminder_tick_interval`. Ticks never overlap: if one is still
/// running when the next fires, the new one is skipped instead of piling
/// up behind a slow membership directory or webhook.
pub fn start_reminder_scheduler(ctx: KlaxonContext) -> ReminderScheduler {
    let (shutdown, mut shutdown_recv) = watch::channel(false);
    let tick_guard = Arc::new(Mutex::new(()));

    let handle = tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_millis(ctx.config.reminder_tick_interval as u64));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let guard = match tick_guard.clone().try_lock_owned() {
                        Ok(guard) => guard,
                        Err(_) => {
                            warn!("Reminder tick skipped, the previous tick is still running");
                            continue;
                        }
                    };
                    let ctx = ctx.clone();
                    tokio::spawn(async move {
                        let _guard = guard;
                        if let Err(e) = execute(ProcessRemindersUseCase, &ctx).await {
                            error!("Reminder tick failed: {:?}", e);
                        }
                        // Pairs from retired alerts leave idle locks behind
                        ctx.preference_locks.sweep();
                    });
                }
                _ = shutdown_recv.changed() => {
                    break;
                }
            }
        }
    });

    ReminderScheduler { shutdown, handle }
}
