mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
use event_reminders_domain::SentReminder;
pub use inmemory::InMemorySentReminderRepo;
pub use postgres::PostgresSentReminderRepo;

/// Keeps track of which reminders have been sent so that runs
/// which overlap or repeat do not send the same reminder twice.
#[async_trait::async_trait]
pub trait ISentReminderRepo: Send + Sync {
    /// Stores the `SentReminder` unless there already is one for the same
    /// favorite and event date. Returns whether this call stored it.
    async fn claim(&self, reminder: &SentReminder) -> anyhow::Result<bool>;
    /// Removes a claim, used when the reminder could not be sent after all
    async fn release(&self, favorite_id: &str, event_date: &DateTime<Utc>) -> anyhow::Result<()>;
}
