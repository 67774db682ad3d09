use crate::{date::parse_event_date, favorite::Favorite};
use chrono::{DateTime, Duration, Utc};
use std::fmt::Display;

/// The timespan in which an event has to start for its `Favorite`s
/// to receive a reminder. The start is exclusive and the end is inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReminderWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Why a `Favorite` did not produce a reminder during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    MissingEventDate,
    MissingUserId,
    MissingEventName,
    InvalidEventDate,
    /// The event has already started
    AlreadyStarted,
    /// The event starts after the end of the `ReminderWindow`
    NotUpcoming,
    UnknownUser,
    MissingPushToken,
    /// A reminder for this occurrence was claimed by an earlier run
    AlreadySent,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingEventDate => "missing_event_date",
            Self::MissingUserId => "missing_user_id",
            Self::MissingEventName => "missing_event_name",
            Self::InvalidEventDate => "invalid_event_date",
            Self::AlreadyStarted => "already_started",
            Self::NotUpcoming => "not_upcoming",
            Self::UnknownUser => "unknown_user",
            Self::MissingPushToken => "missing_push_token",
            Self::AlreadySent => "already_sent",
        }
    }
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `Favorite` that passed every check which does not require a lookup
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingEvent {
    pub favorite_id: String,
    pub user_id: String,
    pub event_name: String,
    pub starts_at: DateTime<Utc>,
}

impl ReminderWindow {
    /// The window that starts at `now` and spans `lookahead` into the future
    pub fn lookahead(now: DateTime<Utc>, lookahead: Duration) -> Self {
        Self {
            start: now,
            end: now + lookahead,
        }
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        *timestamp > self.start && *timestamp <= self.end
    }

    /// Checks the fields of a `Favorite` and the start of its event against this window
    pub fn evaluate(&self, favorite: &Favorite) -> Result<UpcomingEvent, SkipReason> {
        let event_date = favorite.event_date().ok_or(SkipReason::MissingEventDate)?;
        let user_id = favorite.user_id().ok_or(SkipReason::MissingUserId)?;
        let event_name = favorite.event_name().ok_or(SkipReason::MissingEventName)?;

        let starts_at =
            parse_event_date(event_date).map_err(|_| SkipReason::InvalidEventDate)?;
        if starts_at <= self.start {
            return Err(SkipReason::AlreadyStarted);
        }
        if starts_at > self.end {
            return Err(SkipReason::NotUpcoming);
        }

        Ok(UpcomingEvent {
            favorite_id: favorite.id.clone(),
            user_id: user_id.to_string(),
            event_name: event_name.to_string(),
            starts_at,
        })
    }
}

/// Marks that a reminder has been sent for a `Favorite` and a specific start
/// of its event. If the event is moved, a new reminder is allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct SentReminder {
    pub favorite_id: String,
    pub event_date: DateTime<Utc>,
    pub sent_at: DateTime<Utc>,
}

impl SentReminder {
    pub fn new(event: &UpcomingEvent, sent_at: DateTime<Utc>) -> Self {
        Self {
            favorite_id: event.favorite_id.clone(),
            event_date: event.starts_at,
            sent_at,
        }
    }

    pub fn is_for(&self, favorite_id: &str, event_date: &DateTime<Utc>) -> bool {
        self.favorite_id == favorite_id && self.event_date == *event_date
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn window() -> ReminderWindow {
        ReminderWindow::lookahead(now(), Duration::hours(48))
    }

    fn favorite(event_date: &str) -> Favorite {
        Favorite {
            id: "f1".into(),
            event_date: Some(event_date.into()),
            user_id: Some("u1".into()),
            event_name: Some("Concert".into()),
        }
    }

    #[test]
    fn window_excludes_start_and_includes_end() {
        let window = window();
        assert!(!window.contains(&now()));
        assert!(window.contains(&(now() + Duration::milliseconds(1))));
        assert!(window.contains(&(now() + Duration::hours(48))));
        assert!(!window.contains(&(now() + Duration::hours(48) + Duration::milliseconds(1))));
    }

    #[test]
    fn accepts_upcoming_event() {
        let event = window().evaluate(&favorite("2024-01-02T12:00:00Z")).unwrap();
        assert_eq!(
            event,
            UpcomingEvent {
                favorite_id: "f1".into(),
                user_id: "u1".into(),
                event_name: "Concert".into(),
                starts_at: Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap(),
            }
        );
    }

    #[test]
    fn rejects_events_outside_window() {
        let window = window();
        assert_eq!(
            window.evaluate(&favorite("2023-12-31T00:00:00Z")),
            Err(SkipReason::AlreadyStarted)
        );
        assert_eq!(
            window.evaluate(&favorite("2024-01-01T00:00:00Z")),
            Err(SkipReason::AlreadyStarted)
        );
        assert_eq!(
            window.evaluate(&favorite("2024-01-05T00:00:00Z")),
            Err(SkipReason::NotUpcoming)
        );
        assert!(window.evaluate(&favorite("2024-01-03T00:00:00Z")).is_ok());
    }

    #[test]
    fn rejects_incomplete_favorites() {
        let window = window();

        let mut f = favorite("2024-01-02T12:00:00Z");
        f.event_date = None;
        assert_eq!(window.evaluate(&f), Err(SkipReason::MissingEventDate));

        let mut f = favorite("2024-01-02T12:00:00Z");
        f.user_id = None;
        assert_eq!(window.evaluate(&f), Err(SkipReason::MissingUserId));

        let mut f = favorite("2024-01-02T12:00:00Z");
        f.event_name = Some("".into());
        assert_eq!(window.evaluate(&f), Err(SkipReason::MissingEventName));

        assert_eq!(
            window.evaluate(&favorite("next friday")),
            Err(SkipReason::InvalidEventDate)
        );
    }

    #[test]
    fn sent_reminder_is_bound_to_event_date() {
        let event = window().evaluate(&favorite("2024-01-02T12:00:00Z")).unwrap();
        let sent = SentReminder::new(&event, now());
        assert!(sent.is_for("f1", &event.starts_at));
        assert!(!sent.is_for("f1", &(event.starts_at + Duration::hours(1))));
        assert!(!sent.is_for("f2", &event.starts_at));
    }
}
