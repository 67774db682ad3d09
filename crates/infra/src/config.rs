use std::{str::FromStr, time::Duration};
use tracing::{info, warn};

/// How a run deals with a `Favorite` whose user lookup or send fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first failure aborts the rest of the run
    Abort,
    /// Failures are logged and counted, the run continues with the next `Favorite`
    Isolate,
}

/// How the `Favorite`s are fetched from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Every `Favorite` is fetched and filtered in process
    Full,
    /// Only the `Favorite`s with an event date inside the reminder window are fetched
    Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Runs on a fixed interval until the process is stopped
    Scheduled,
    /// Runs a single time and exits. Used when some external scheduler
    /// (e.g. a cron job) starts the process.
    Once,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "isolate" => Ok(Self::Isolate),
            _ => Err(s.to_string()),
        }
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "window" => Ok(Self::Window),
            _ => Err(s.to_string()),
        }
    }
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "once" => Ok(Self::Once),
            _ => Err(s.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// How far into the future an event may start and still get a reminder
    pub lookahead: chrono::Duration,
    /// Time between two runs of the send reminders job
    pub run_interval: Duration,
    pub run_mode: RunMode,
    pub failure_policy: FailurePolicy,
    /// Maximum number of `Favorite`s that are processed at the same time.
    /// Only used with `FailurePolicy::Isolate`, an aborting run is always sequential.
    pub dispatch_concurrency: usize,
    pub scan_mode: ScanMode,
    /// Claim a `SentReminder` before sending so that the same reminder is
    /// not sent twice by repeated or overlapping runs
    pub deduplicate: bool,
    /// How many times a send that failed with a transient error is retried
    pub send_max_retries: u32,
    /// Delay before the first retry, doubled for every following retry
    pub send_retry_base_delay: Duration,
}

impl Config {
    pub fn new() -> Self {
        let default = Self::default();
        let lookahead_hours = parse_env("REMINDER_LOOKAHEAD_HOURS", 48_i64);
        let run_interval_minutes = parse_env("REMINDER_RUN_INTERVAL_MINUTES", 60_u64);
        let config = Self {
            lookahead: chrono::Duration::hours(lookahead_hours.max(1)),
            run_interval: Duration::from_secs(run_interval_minutes.max(1) * 60),
            run_mode: parse_env("REMINDER_RUN_MODE", default.run_mode),
            failure_policy: parse_env("REMINDER_FAILURE_POLICY", default.failure_policy),
            dispatch_concurrency: parse_env(
                "REMINDER_DISPATCH_CONCURRENCY",
                default.dispatch_concurrency,
            ),
            scan_mode: parse_env("REMINDER_SCAN_MODE", default.scan_mode),
            deduplicate: parse_env("REMINDER_DEDUPLICATE", default.deduplicate),
            send_max_retries: parse_env("REMINDER_SEND_MAX_RETRIES", default.send_max_retries),
            send_retry_base_delay: Duration::from_millis(parse_env(
                "REMINDER_SEND_RETRY_BASE_DELAY_MS",
                500_u64,
            )),
        };
        if config.failure_policy == FailurePolicy::Abort && config.dispatch_concurrency > 1 {
            warn!(
                "REMINDER_DISPATCH_CONCURRENCY: {} is ignored with the abort failure policy. Favorites will be processed one at a time.",
                config.dispatch_concurrency
            );
        }
        info!("Send reminders job configuration: {:?}", config);
        config
    }

    /// The number of `Favorite`s a run processes at the same time
    pub fn effective_concurrency(&self) -> usize {
        match self.failure_policy {
            FailurePolicy::Abort => 1,
            FailurePolicy::Isolate => self.dispatch_concurrency.max(1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookahead: chrono::Duration::hours(48),
            run_interval: Duration::from_secs(60 * 60),
            run_mode: RunMode::Scheduled,
            failure_policy: FailurePolicy::Isolate,
            dispatch_concurrency: 1,
            scan_mode: ScanMode::Full,
            deduplicate: false,
            send_max_retries: 3,
            send_retry_base_delay: Duration::from_millis(500),
        }
    }
}

fn parse_env<T: FromStr + std::fmt::Debug>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {:?}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_policies_case_insensitive() {
        assert_eq!("Abort".parse::<FailurePolicy>(), Ok(FailurePolicy::Abort));
        assert_eq!("isolate".parse::<FailurePolicy>(), Ok(FailurePolicy::Isolate));
        assert!("retry".parse::<FailurePolicy>().is_err());
        assert_eq!("WINDOW".parse::<ScanMode>(), Ok(ScanMode::Window));
        assert_eq!("once".parse::<RunMode>(), Ok(RunMode::Once));
    }

    #[test]
    fn aborting_runs_are_sequential() {
        let mut config = Config::default();
        config.dispatch_concurrency = 8;
        assert_eq!(config.effective_concurrency(), 8);
        config.failure_policy = FailurePolicy::Abort;
        assert_eq!(config.effective_concurrency(), 1);
        config.failure_policy = FailurePolicy::Isolate;
        config.dispatch_concurrency = 0;
        assert_eq!(config.effective_concurrency(), 1);
    }

    #[test]
    fn falls_back_to_default_on_invalid_env_value() {
        std::env::set_var("REMINDER_TEST_INVALID_NUMBER", "forty");
        assert_eq!(parse_env("REMINDER_TEST_INVALID_NUMBER", 48_i64), 48);
        std::env::set_var("REMINDER_TEST_VALID_NUMBER", "12");
        assert_eq!(parse_env("REMINDER_TEST_VALID_NUMBER", 48_i64), 12);
        assert_eq!(parse_env("REMINDER_TEST_MISSING_NUMBER", 3_u32), 3);
    }
}
