mod job_schedulers;
mod reminder;
mod shared;

pub use job_schedulers::{get_start_delay, start_send_reminders_job, SendRemindersJob};
pub use reminder::{run_once, DispatchError, DispatchSummary, SendEventRemindersUseCase};
pub use shared::usecase::{execute, UseCase};
