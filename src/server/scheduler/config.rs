//! Job names and default cron expressions.
//!
//! Expressions use the six-field `sec min hour dom mon dow` format of `tokio-cron-scheduler`.

pub mod monthly_reset {
    pub const JOB_NAME: &str = "monthly_reset";

    /// Midnight UTC on the first day of every month
    pub const CRON_EXPRESSION: &str = "0 0 0 1 * *";
}

pub mod leave_sweep {
    pub const JOB_NAME: &str = "leave_sweep";

    /// Every day at 00:05 UTC
    pub const CRON_EXPRESSION: &str = "0 5 0 * * *";
}

/// Cron expressions the scheduler registers its jobs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub monthly_reset_cron: String,
    pub leave_sweep_cron: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            monthly_reset_cron: monthly_reset::CRON_EXPRESSION.to_string(),
            leave_sweep_cron: leave_sweep::CRON_EXPRESSION.to_string(),
        }
    }
}
