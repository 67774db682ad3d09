use super::IFavoriteRepo;
use crate::repos::shared::inmemory_repo::*;
use event_reminders_domain::{parse_event_date, Favorite, ReminderWindow};

pub struct InMemoryFavoriteRepo {
    favorites: std::sync::Mutex<Vec<Favorite>>,
}

impl InMemoryFavoriteRepo {
    pub fn new() -> Self {
        Self {
            favorites: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IFavoriteRepo for InMemoryFavoriteRepo {
    async fn insert(&self, favorite: &Favorite) -> anyhow::Result<()> {
        insert(favorite, &self.favorites);
        Ok(())
    }

    async fn delete(&self, favorite_id: &str) -> Option<Favorite> {
        delete(favorite_id, &self.favorites)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Favorite>> {
        Ok(find_by(&self.favorites, |_| true))
    }

    async fn find_in_window(&self, window: &ReminderWindow) -> anyhow::Result<Vec<Favorite>> {
        Ok(find_by(&self.favorites, |f| {
            f.event_date()
                .and_then(|date| parse_event_date(date).ok())
                .map(|date| window.contains(&date))
                .unwrap_or(false)
        }))
    }
}
