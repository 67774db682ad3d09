mod send_event_reminders;

use crate::shared::usecase::execute;
use chrono::{DateTime, Utc};
use event_reminders_infra::ReminderContext;
pub use send_event_reminders::{DispatchError, DispatchSummary, SendEventRemindersUseCase};

/// Runs the send reminders job a single time as if it was triggered at `now`
pub async fn run_once(
    now: DateTime<Utc>,
    ctx: &ReminderContext,
) -> Result<DispatchSummary, DispatchError> {
    execute(SendEventRemindersUseCase { now }, ctx).await
}
