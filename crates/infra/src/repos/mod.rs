mod favorite;
mod sent_reminder;
mod shared;
mod user;

pub use favorite::{IFavoriteRepo, InMemoryFavoriteRepo, PostgresFavoriteRepo};
pub use sent_reminder::{ISentReminderRepo, InMemorySentReminderRepo, PostgresSentReminderRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
pub use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub favorites: Arc<dyn IFavoriteRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub sent_reminders: Arc<dyn ISentReminderRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        sqlx::migrate!().run(&pool).await?;

        Ok(Self {
            favorites: Arc::new(PostgresFavoriteRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            sent_reminders: Arc::new(PostgresSentReminderRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            favorites: Arc::new(InMemoryFavoriteRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            sent_reminders: Arc::new(InMemorySentReminderRepo::new()),
        }
    }
}
