use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const EVENT_REMINDER_TITLE: &str = "Upcoming Event Reminder";

/// A push notification that is about to be handed over to the push gateway.
/// It is not persisted anywhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationMessage {
    /// Push token of the receiving device
    pub token: String,
    pub title: String,
    pub body: String,
}

impl NotificationMessage {
    /// Reminds the owner of `token` that `event_name` is about to start
    pub fn event_reminder(token: &str, event_name: &str) -> Self {
        Self {
            token: token.to_string(),
            title: EVENT_REMINDER_TITLE.to_string(),
            body: format!("{} is happening soon!", event_name),
        }
    }
}

/// Identifier the push gateway assigned to an accepted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_event_reminder() {
        let message = NotificationMessage::event_reminder("tok1", "Concert");
        assert_eq!(message.token, "tok1");
        assert_eq!(message.title, "Upcoming Event Reminder");
        assert_eq!(message.body, "Concert is happening soon!");
    }
}
