use crate::shared::usecase::UseCase;
use chrono::{DateTime, Utc};
use event_reminders_domain::{
    MessageId, NotificationMessage, ReminderWindow, SentReminder, SkipReason, UpcomingEvent,
};
use event_reminders_infra::{FailurePolicy, PushError, ReminderContext, ScanMode};
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn};
use tracing_futures::Instrument;

/// Sends a push notification to the owner of every `Favorite` whose
/// event starts inside the reminder window following `now`.
///
/// Nothing is remembered between runs unless `Config::deduplicate` is set,
/// so running this twice for the same window sends the same reminders twice.
#[derive(Debug)]
pub struct SendEventRemindersUseCase {
    /// The time the job was triggered at
    pub now: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum DispatchError {
    /// The `Favorite`s could not be fetched, nothing was sent
    #[error("Unable to fetch favorites. Error message: `{0}`")]
    StoreUnavailable(anyhow::Error),
    #[error("Unable to look up user: {user_id}. Error message: `{error}`")]
    LookupFailure {
        user_id: String,
        error: anyhow::Error,
    },
    #[error("Unable to claim reminder for favorite: {favorite_id}. Error message: `{error}`")]
    ClaimFailure {
        favorite_id: String,
        error: anyhow::Error,
    },
    #[error("Unable to send reminder for favorite: {favorite_id}. Error message: `{error}`")]
    SendFailure {
        favorite_id: String,
        error: PushError,
    },
}

/// What happened during a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchSummary {
    /// Number of `Favorite`s returned by the store
    pub scanned: usize,
    pub sent: usize,
    /// Number of `Favorite`s that failed with `FailurePolicy::Isolate`
    pub failed: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl DispatchSummary {
    fn new(scanned: usize) -> Self {
        Self {
            scanned,
            ..Default::default()
        }
    }

    fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }

    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

#[derive(Debug)]
enum ReminderOutcome {
    Sent,
    Skipped(SkipReason),
}

impl SendEventRemindersUseCase {
    async fn fetch_favorites(
        &self,
        window: &ReminderWindow,
        ctx: &ReminderContext,
    ) -> Result<Vec<event_reminders_domain::Favorite>, DispatchError> {
        let favorites = match ctx.config.scan_mode {
            ScanMode::Full => ctx.repos.favorites.find_all().await,
            ScanMode::Window => ctx.repos.favorites.find_in_window(window).await,
        };
        favorites.map_err(DispatchError::StoreUnavailable)
    }

    /// Looks up the owner of the upcoming event and sends the reminder
    async fn remind(
        &self,
        event: UpcomingEvent,
        ctx: &ReminderContext,
    ) -> Result<ReminderOutcome, DispatchError> {
        let user = ctx
            .repos
            .users
            .find(&event.user_id)
            .await
            .map_err(|error| DispatchError::LookupFailure {
                user_id: event.user_id.clone(),
                error,
            })?;
        let user = match user {
            Some(user) => user,
            None => return Ok(ReminderOutcome::Skipped(SkipReason::UnknownUser)),
        };
        let token = match user.push_token() {
            Some(token) => token,
            None => return Ok(ReminderOutcome::Skipped(SkipReason::MissingPushToken)),
        };

        if ctx.config.deduplicate {
            let claimed = ctx
                .repos
                .sent_reminders
                .claim(&SentReminder::new(&event, self.now))
                .await
                .map_err(|error| DispatchError::ClaimFailure {
                    favorite_id: event.favorite_id.clone(),
                    error,
                })?;
            if !claimed {
                return Ok(ReminderOutcome::Skipped(SkipReason::AlreadySent));
            }
        }

        let message = NotificationMessage::event_reminder(token, &event.event_name);
        match send_with_retry(&message, ctx).await {
            Ok(message_id) => {
                info!(
                    message_id = %message_id,
                    "Notification sent to {} for event {}",
                    event.user_id, event.event_name
                );
                Ok(ReminderOutcome::Sent)
            }
            Err(e) => {
                // Give the next run a chance to send it
                if ctx.config.deduplicate {
                    if let Err(release_error) = ctx
                        .repos
                        .sent_reminders
                        .release(&event.favorite_id, &event.starts_at)
                        .await
                    {
                        error!(
                            "Unable to release reminder claim for favorite: {}. Error message: {:?}",
                            event.favorite_id, release_error
                        );
                    }
                }
                Err(DispatchError::SendFailure {
                    favorite_id: event.favorite_id,
                    error: e,
                })
            }
        }
    }
}

/// Sends the message and retries transient failures with exponential backoff
async fn send_with_retry(
    message: &NotificationMessage,
    ctx: &ReminderContext,
) -> Result<MessageId, PushError> {
    let mut attempt = 0;
    loop {
        match ctx.push.send(message).await {
            Ok(message_id) => return Ok(message_id),
            Err(e) if e.is_transient() && attempt < ctx.config.send_max_retries => {
                let delay = ctx
                    .config
                    .send_retry_base_delay
                    .saturating_mul(2_u32.saturating_pow(attempt));
                warn!(
                    "Push gateway send failed, retrying in {:?}. Error message: {}",
                    delay, e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for SendEventRemindersUseCase {
    type Response = DispatchSummary;

    type Errors = DispatchError;

    const NAME: &'static str = "SendEventReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Errors> {
        let window = ReminderWindow::lookahead(self.now, ctx.config.lookahead);
        let favorites = self.fetch_favorites(&window, ctx).await?;

        let mut summary = DispatchSummary::new(favorites.len());
        let mut upcoming = Vec::new();
        for favorite in &favorites {
            match window.evaluate(favorite) {
                Ok(event) => upcoming.push(event),
                Err(reason) => {
                    debug!("Skipping favorite: {}. Reason: {}", favorite.id, reason);
                    summary.skip(reason);
                }
            }
        }

        let usecase = &*self;
        let mut reminders = stream::iter(upcoming)
            .map(|event| {
                let span = info_span!(
                    "Sending event reminder",
                    favorite_id = %event.favorite_id,
                    user_id = %event.user_id
                );
                usecase.remind(event, ctx).instrument(span)
            })
            .buffer_unordered(ctx.config.effective_concurrency());

        while let Some(outcome) = reminders.next().await {
            match outcome {
                Ok(ReminderOutcome::Sent) => summary.sent += 1,
                Ok(ReminderOutcome::Skipped(reason)) => summary.skip(reason),
                Err(e) => match ctx.config.failure_policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Isolate => {
                        warn!("Continuing after failed reminder. Error message: {}", e);
                        summary.failed += 1;
                    }
                },
            }
        }

        info!(
            scanned = summary.scanned,
            sent = summary.sent,
            failed = summary.failed,
            skipped = summary.total_skipped(),
            "Send event reminders run completed"
        );
        Ok(summary)
    }
}
