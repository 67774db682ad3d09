mod date;
mod favorite;
mod notification;
mod reminder;
mod shared;
mod user;

pub use date::{parse_event_date, InvalidEventDate};
pub use favorite::Favorite;
pub use notification::{MessageId, NotificationMessage, EVENT_REMINDER_TITLE};
pub use reminder::{ReminderWindow, SentReminder, SkipReason, UpcomingEvent};
pub use shared::entity::Entity;
pub use user::User;
