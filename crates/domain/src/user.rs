use crate::shared::entity::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Opaque address used by the push gateway to reach the devices of this `User`
    #[serde(default, alias = "fcmToken")]
    pub push_token: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            push_token: None,
        }
    }

    pub fn with_push_token(mut self, token: impl Into<String>) -> Self {
        self.push_token = Some(token.into());
        self
    }

    /// The push token if there is one that can be addressed
    pub fn push_token(&self) -> Option<&str> {
        self.push_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}
