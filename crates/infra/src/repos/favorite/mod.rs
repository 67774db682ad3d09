mod inmemory;
mod postgres;

use event_reminders_domain::{Favorite, ReminderWindow};
pub use inmemory::InMemoryFavoriteRepo;
pub use postgres::PostgresFavoriteRepo;

#[async_trait::async_trait]
pub trait IFavoriteRepo: Send + Sync {
    async fn insert(&self, favorite: &Favorite) -> anyhow::Result<()>;
    async fn delete(&self, favorite_id: &str) -> Option<Favorite>;
    async fn find_all(&self) -> anyhow::Result<Vec<Favorite>>;
    /// Finds the `Favorite`s whose event starts inside the `ReminderWindow`.
    /// `Favorite`s without a valid event date are never returned.
    async fn find_in_window(&self, window: &ReminderWindow) -> anyhow::Result<Vec<Favorite>>;
}
