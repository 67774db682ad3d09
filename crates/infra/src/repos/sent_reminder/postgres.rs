use super::ISentReminderRepo;
use chrono::{DateTime, Utc};
use event_reminders_domain::SentReminder;
use sqlx::PgPool;

pub struct PostgresSentReminderRepo {
    pool: PgPool,
}

impl PostgresSentReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ISentReminderRepo for PostgresSentReminderRepo {
    async fn claim(&self, reminder: &SentReminder) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO sent_reminders(favorite_uid, event_date, sent_at)
            VALUES($1, $2, $3)
            ON CONFLICT (favorite_uid, event_date) DO NOTHING
            "#,
        )
        .bind(&reminder.favorite_id)
        .bind(reminder.event_date)
        .bind(reminder.sent_at)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn release(&self, favorite_id: &str, event_date: &DateTime<Utc>) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM sent_reminders AS r
            WHERE r.favorite_uid = $1 AND
            r.event_date = $2
            "#,
        )
        .bind(favorite_id)
        .bind(event_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
