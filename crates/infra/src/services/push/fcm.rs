use super::{IPushGateway, PushError};
use event_reminders_domain::{MessageId, NotificationMessage};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

pub const FCM_API_BASE_URL: &str = "https://fcm.googleapis.com/v1";

const UNKNOWN_MESSAGE_ID: &str = "unknown";

#[derive(Debug, Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct FcmMessage<'a> {
    token: &'a str,
    notification: FcmNotification<'a>,
}

#[derive(Debug, Serialize)]
struct FcmSendRequest<'a> {
    message: FcmMessage<'a>,
}

impl<'a> From<&'a NotificationMessage> for FcmSendRequest<'a> {
    fn from(message: &'a NotificationMessage) -> Self {
        Self {
            message: FcmMessage {
                token: &message.token,
                notification: FcmNotification {
                    title: &message.title,
                    body: &message.body,
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct FcmSendResponse {
    /// e.g. `projects/myproject/messages/0:1500415314455276%31bd1c9631bd1c96`
    name: String,
}

#[derive(Debug, Deserialize)]
struct FcmErrorResponse {
    error: FcmErrorStatus,
}

#[derive(Debug, Deserialize)]
struct FcmErrorStatus {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Push gateway backed by the Firebase Cloud Messaging HTTP v1 API
pub struct FcmPushGateway {
    client: Client,
    base_url: String,
    project_id: String,
    access_token: String,
}

impl FcmPushGateway {
    pub fn with_base_url(base_url: String, project_id: String, access_token: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id,
            access_token,
        }
    }

    fn send_url(&self) -> String {
        format!("{}/projects/{}/messages:send", self.base_url, self.project_id)
    }
}

/// Whether it makes sense to send the message again depends on the status code.
/// Throttling and server errors are transient, the other client errors are not.
fn classify_error(status: StatusCode, body: &str) -> PushError {
    let reason = match serde_json::from_str::<FcmErrorResponse>(body) {
        Ok(res) => format!("{} {}: {}", status.as_u16(), res.error.status, res.error.message),
        Err(_) => format!("{}: {}", status.as_u16(), body),
    };
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        PushError::Unavailable(reason)
    } else {
        PushError::Rejected(reason)
    }
}

#[async_trait::async_trait]
impl IPushGateway for FcmPushGateway {
    async fn send(&self, message: &NotificationMessage) -> Result<MessageId, PushError> {
        let res = self
            .client
            .post(&self.send_url())
            .header("authorization", format!("Bearer {}", self.access_token))
            .json(&FcmSendRequest::from(message))
            .send()
            .await
            .map_err(|e| {
                error!("[Network Error] FCM send error. Error message: {:?}", e);
                PushError::Unavailable(e.to_string())
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(classify_error(status, &body));
        }

        let body = res.text().await.unwrap_or_default();
        Ok(message_id_from_response(&body))
    }
}

/// The message is accepted once FCM answers with a success status, even if
/// the response does not carry the message name.
fn message_id_from_response(body: &str) -> MessageId {
    match serde_json::from_str::<FcmSendResponse>(body) {
        Ok(res) => MessageId(res.name),
        Err(e) => {
            warn!(
                "[Unexpected Response] FCM accepted the message but the response could not be read. Error message: {:?}",
                e
            );
            MessageId(UNKNOWN_MESSAGE_ID.to_string())
        }
    }
}
