mod fcm;
mod inmemory;

use event_reminders_domain::{MessageId, NotificationMessage};
pub use fcm::{FcmPushGateway, FCM_API_BASE_URL};
pub use inmemory::InMemoryPushGateway;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PushError {
    /// The message will never be accepted, e.g. because the push token
    /// is unregistered. Sending it again is pointless.
    #[error("The push gateway rejected the message. Error message: `{0}`")]
    Rejected(String),
    /// The push gateway could not be reached or asked us to back off
    #[error("The push gateway is unavailable. Error message: `{0}`")]
    Unavailable(String),
}

impl PushError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Delivers `NotificationMessage`s to the devices behind a push token
#[async_trait::async_trait]
pub trait IPushGateway: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> Result<MessageId, PushError>;
}
