use crate::reminder::run_once;
use event_reminders_infra::ReminderContext;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Seconds until the next multiple of `interval_secs` since the unix epoch.
/// An hourly job therefore starts at the top of the next hour.
pub fn get_start_delay(now_ts: usize, interval_secs: usize) -> usize {
    let interval_secs = interval_secs.max(1);
    interval_secs - (now_ts / 1000) % interval_secs
}

/// Handle to the running send reminders job
pub struct SendRemindersJob {
    ticker: JoinHandle<()>,
    running: Arc<Mutex<()>>,
}

impl SendRemindersJob {
    /// Stops triggering new runs and waits for the run in progress to complete
    pub async fn shutdown(self) {
        self.ticker.abort();
        // The ticker only spawns a run while holding the guard, so once it has
        // stopped every spawned run is either completed or holds the guard.
        let _ = self.ticker.await;
        let _guard = self.running.lock().await;
        info!("Send reminders job stopped");
    }
}

/// Triggers a send reminders run every `Config::run_interval`.
/// A tick is skipped if the run of the previous tick has not completed yet.
pub fn start_send_reminders_job(ctx: ReminderContext) -> SendRemindersJob {
    let running = Arc::new(Mutex::new(()));
    let ticker = tokio::spawn(tick_send_reminders(ctx, running.clone()));
    SendRemindersJob { ticker, running }
}

async fn tick_send_reminders(ctx: ReminderContext, running: Arc<Mutex<()>>) {
    let period = ctx.config.run_interval;
    let now = ctx.sys.get_timestamp_millis().max(0) as usize;
    let secs_to_next_run = get_start_delay(now, period.as_secs() as usize);
    info!(
        "Send reminders job scheduled. First run in {} seconds",
        secs_to_next_run
    );

    let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);
    let mut interval = interval_at(start, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;

        let guard = match running.clone().try_lock_owned() {
            Ok(guard) => guard,
            Err(_) => {
                warn!("The previous send reminders run is still in progress. Skipping this run.");
                continue;
            }
        };
        let context = ctx.clone();
        tokio::spawn(async move {
            send_reminders(context).await;
            drop(guard);
        });
    }
}

async fn send_reminders(context: ReminderContext) {
    let now = context.sys.now();
    // Failed runs are logged by the usecase executor
    if let Ok(summary) = run_once(now, &context).await {
        info!(
            "Send reminders run triggered at {} sent {} reminders",
            now, summary.sent
        );
    }
}
