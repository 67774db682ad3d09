use super::{IPushGateway, PushError};
use event_reminders_domain::{MessageId, NotificationMessage};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::info;

/// Push gateway that keeps every accepted message in memory instead of delivering it.
/// Tokens can be set up to be rejected or to fail a number of times before
/// they are accepted.
pub struct InMemoryPushGateway {
    sent: Mutex<Vec<NotificationMessage>>,
    rejected_tokens: Mutex<HashSet<String>>,
    // token -> remaining transient failures
    unavailable_tokens: Mutex<HashMap<String, u32>>,
}

impl InMemoryPushGateway {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            rejected_tokens: Mutex::new(HashSet::new()),
            unavailable_tokens: Mutex::new(HashMap::new()),
        }
    }

    pub fn reject_token(&self, token: &str) {
        self.rejected_tokens.lock().unwrap().insert(token.to_string());
    }

    /// The next `times` sends to `token` fail with `PushError::Unavailable`
    pub fn fail_transiently(&self, token: &str, times: u32) {
        self.unavailable_tokens
            .lock()
            .unwrap()
            .insert(token.to_string(), times);
    }

    pub fn sent_messages(&self) -> Vec<NotificationMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryPushGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IPushGateway for InMemoryPushGateway {
    async fn send(&self, message: &NotificationMessage) -> Result<MessageId, PushError> {
        if self.rejected_tokens.lock().unwrap().contains(&message.token) {
            return Err(PushError::Rejected(format!(
                "Push token: {} is not registered",
                message.token
            )));
        }
        if let Some(remaining) = self.unavailable_tokens.lock().unwrap().get_mut(&message.token) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(PushError::Unavailable("Service unavailable".into()));
            }
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(message.clone());
        let message_id = MessageId(format!("inmemory/{}", sent.len()));
        info!(
            "Kept push notification: {} in memory. Title: `{}`, body: `{}`",
            message_id, message.title, message.body
        );
        Ok(message_id)
    }
}
