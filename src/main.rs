mod telemetry;

use event_reminders_core::{run_once, start_send_reminders_job};
use event_reminders_infra::{setup_context, RunMode};
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("event_reminders".into(), "info".into());
    init_subscriber(subscriber)?;

    let context = setup_context().await?;

    match context.config.run_mode {
        RunMode::Once => {
            let summary = run_once(context.sys.now(), &context).await?;
            info!(
                "Send reminders run completed. Scanned: {}, sent: {}, failed: {}, skipped: {}",
                summary.scanned,
                summary.sent,
                summary.failed,
                summary.total_skipped()
            );
        }
        RunMode::Scheduled => {
            let job = start_send_reminders_job(context);
            tokio::signal::ctrl_c().await?;
            info!("Received shutdown signal. Waiting for the send reminders run in progress.");
            job.shutdown().await;
        }
    }

    Ok(())
}
