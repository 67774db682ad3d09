use super::ISentReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, Utc};
use event_reminders_domain::SentReminder;
use std::sync::Mutex;

pub struct InMemorySentReminderRepo {
    sent_reminders: Mutex<Vec<SentReminder>>,
}

impl InMemorySentReminderRepo {
    pub fn new() -> Self {
        Self {
            sent_reminders: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ISentReminderRepo for InMemorySentReminderRepo {
    async fn claim(&self, reminder: &SentReminder) -> anyhow::Result<bool> {
        // Check and insert under the same lock
        let mut sent_reminders = self.sent_reminders.lock().unwrap();
        if sent_reminders
            .iter()
            .any(|r| r.is_for(&reminder.favorite_id, &reminder.event_date))
        {
            return Ok(false);
        }
        sent_reminders.push(reminder.clone());
        Ok(true)
    }

    async fn release(&self, favorite_id: &str, event_date: &DateTime<Utc>) -> anyhow::Result<()> {
        find_and_delete_by(&self.sent_reminders, |r| r.is_for(favorite_id, event_date));
        Ok(())
    }
}
