use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use event_reminders_domain::User;

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        save(user, &self.users);
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Option<User> {
        delete(user_id, &self.users)
    }

    async fn find(&self, user_id: &str) -> anyhow::Result<Option<User>> {
        Ok(find(user_id, &self.users))
    }
}
