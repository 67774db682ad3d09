use chrono::{DateTime, TimeZone, Utc};
use event_reminders_domain::{Favorite, User};
use event_reminders_infra::{InMemoryPushGateway, ReminderContext, StaticTimeSys};
use std::sync::Arc;
use std::time::Duration;

pub struct TestApp {
    pub ctx: ReminderContext,
    pub push: Arc<InMemoryPushGateway>,
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

// Inmemory store and push gateway with the clock frozen at `now`
pub fn spawn_app() -> TestApp {
    let mut ctx = ReminderContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys(now().timestamp_millis()));
    ctx.config.send_retry_base_delay = Duration::from_millis(0);
    let push = Arc::new(InMemoryPushGateway::new());
    ctx.push = push.clone();
    TestApp { ctx, push }
}

impl TestApp {
    pub async fn create_user(&self, user_id: &str, push_token: &str) {
        self.ctx
            .repos
            .users
            .insert(&User::new(user_id).with_push_token(push_token))
            .await
            .expect("To insert user");
    }

    pub async fn favorite(&self, id: &str, user_id: &str, event_name: &str, event_date: &str) {
        self.ctx
            .repos
            .favorites
            .insert(&Favorite {
                id: id.into(),
                event_date: Some(event_date.into()),
                user_id: Some(user_id.into()),
                event_name: Some(event_name.into()),
            })
            .await
            .expect("To insert favorite");
    }
}
