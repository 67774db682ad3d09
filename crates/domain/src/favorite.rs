use crate::shared::entity::Entity;
use serde::{Deserialize, Serialize};

/// A `Favorite` is a `User`s saved interest in an event.
///
/// The store owns these documents and does not enforce a schema on them,
/// so every field besides the document `id` might be missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    /// When the event starts, as it was written to the store
    #[serde(default)]
    pub event_date: Option<String>,
    /// The `User` that saved this `Favorite`
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
}

impl Favorite {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn event_date(&self) -> Option<&str> {
        non_empty(&self.event_date)
    }

    pub fn user_id(&self) -> Option<&str> {
        non_empty(&self.user_id)
    }

    pub fn event_name(&self) -> Option<&str> {
        non_empty(&self.event_name)
    }
}

// Empty strings are treated the same way as missing fields
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

impl Entity for Favorite {
    fn id(&self) -> &str {
        &self.id
    }
}
