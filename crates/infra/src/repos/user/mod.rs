mod inmemory;
mod postgres;

use event_reminders_domain::User;
pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn delete(&self, user_id: &str) -> Option<User>;
    /// `Ok(None)` means that there is no such `User`, an error
    /// means that the store could not be asked
    async fn find(&self, user_id: &str) -> anyhow::Result<Option<User>>;
}
