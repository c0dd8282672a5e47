//! Scheduled jobs and the guarded runner shared by cron triggers and forced runs.

pub mod leave_sweep;
pub mod monthly_reset;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::scheduler::JobStatusDto,
    server::{
        data::scheduler_run::SchedulerRunRepository,
        error::Error,
        scheduler::{
            config::{self, ScheduleConfig},
            period::{already_ran, Period},
        },
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledJob {
    MonthlyReset,
    LeaveSweep,
}

impl ScheduledJob {
    pub const ALL: [ScheduledJob; 2] = [ScheduledJob::MonthlyReset, ScheduledJob::LeaveSweep];

    pub fn name(self) -> &'static str {
        match self {
            ScheduledJob::MonthlyReset => config::monthly_reset::JOB_NAME,
            ScheduledJob::LeaveSweep => config::leave_sweep::JOB_NAME,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|job| job.name() == name)
    }

    pub fn period(self) -> Period {
        match self {
            ScheduledJob::MonthlyReset => Period::Monthly,
            ScheduledJob::LeaveSweep => Period::Daily,
        }
    }

    pub fn cron(self, schedule: &ScheduleConfig) -> &str {
        match self {
            ScheduledJob::MonthlyReset => &schedule.monthly_reset_cron,
            ScheduledJob::LeaveSweep => &schedule.leave_sweep_cron,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The current period was already handled by an earlier run
    Skipped,
    Ran { affected: usize },
}

/// Runs a job unless it already ran in the current period, then records the run.
///
/// The period check, the job's writes and the run record share one transaction, so a failure
/// anywhere leaves neither the job's effects nor the record behind. The check locks the job's
/// `scheduler_run` row, so a concurrent trigger waits and then sees this run.
///
/// # Arguments
/// - `job`: Job to run
/// - `force`: Skip the period check, used for manual runs
///
/// # Returns
/// - `Ok(JobOutcome::Skipped)`: The job already ran in the current period
/// - `Ok(JobOutcome::Ran)`: The job ran and its run was recorded
/// - `Err(Error)`: The job or the bookkeeping failed and nothing was committed
pub async fn run_job(
    db: &DatabaseConnection,
    job: ScheduledJob,
    force: bool,
) -> Result<JobOutcome, Error> {
    let now = Utc::now().naive_utc();
    let txn = db.begin().await?;
    let run_repo = SchedulerRunRepository::new(&txn);

    if !force {
        let last_run = run_repo
            .find_by_job_for_update(job.name())
            .await?
            .map(|run| run.last_run_at);

        if already_ran(job.period(), last_run, now) {
            return Ok(JobOutcome::Skipped);
        }
    }

    let affected = match job {
        ScheduledJob::MonthlyReset => monthly_reset::run(&txn).await? as usize,
        ScheduledJob::LeaveSweep => leave_sweep::run(&txn, now.date()).await?.total(),
    };

    run_repo.record_run(job.name(), now).await?;
    txn.commit().await?;

    Ok(JobOutcome::Ran { affected })
}

/// Every job with its cron expression and last recorded run
pub async fn job_statuses(
    db: &DatabaseConnection,
    schedule: &ScheduleConfig,
) -> Result<Vec<JobStatusDto>, Error> {
    let runs = SchedulerRunRepository::new(db).list().await?;

    Ok(ScheduledJob::ALL
        .into_iter()
        .map(|job| JobStatusDto {
            job: job.name().to_string(),
            cron: job.cron(schedule).to_string(),
            last_run_at: runs
                .iter()
                .find(|run| run.job == job.name())
                .map(|run| run.last_run_at),
        })
        .collect())
}
