//! Cron scheduler for time-driven jobs.
//!
//! Jobs run on real cron expressions. Every run goes through [`jobs::run_job`], which skips a
//! period that already has a recorded run and commits the job together with its run record,
//! so a restart never applies a monthly reset or a daily sweep twice.

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::error::Error;

pub mod config;
pub mod jobs;
pub mod period;

#[cfg(test)]
mod tests;

use self::{
    config::ScheduleConfig,
    jobs::{run_job, JobOutcome, ScheduledJob},
};

pub struct Scheduler {
    db: DatabaseConnection,
    schedule: ScheduleConfig,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`]
    ///
    /// # Arguments
    /// - `db`: Connection the jobs run on
    /// - `schedule`: Cron expressions for `monthly_reset` and `leave_sweep`
    ///
    /// # Returns
    /// - `Err(Error::SchedulerError)`: the underlying job scheduler failed to initialize
    pub async fn new(db: DatabaseConnection, schedule: ScheduleConfig) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;

        Ok(Self {
            db,
            schedule,
            sched,
        })
    }

    /// Registers every job with its configured cron expression and starts the scheduler.
    ///
    /// Consumes the scheduler; jobs keep firing in the background until the process exits.
    ///
    /// # Returns
    /// - `Ok(())`: All jobs registered and the scheduler is running
    /// - `Err(Error::SchedulerError)`: A cron expression failed to parse or the scheduler
    ///   failed to start
    pub async fn start(mut self) -> Result<(), Error> {
        for job in ScheduledJob::ALL {
            let cron = job.cron(&self.schedule).to_string();
            self.schedule_job(&cron, job).await?;
        }

        self.sched.start().await?;

        Ok(())
    }

    /// Adds a cron job that runs `job` through the period guard, logging instead of failing.
    ///
    /// # Arguments
    /// - `cron`: Six-field cron expression, seconds first
    /// - `job`: Job to trigger
    pub async fn schedule_job(&mut self, cron: &str, job: ScheduledJob) -> Result<(), Error> {
        let db = self.db.clone();

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();

                Box::pin(async move {
                    match run_job(&db, job, false).await {
                        Ok(JobOutcome::Ran { affected }) => {
                            tracing::info!("Scheduled {} run affected {}", job.name(), affected)
                        }
                        Ok(JobOutcome::Skipped) => {
                            tracing::debug!("Skipped {}, already ran this period", job.name())
                        }
                        Err(e) => tracing::error!("Error running {}: {:?}", job.name(), e),
                    }
                })
            })?)
            .await?;

        tracing::debug!("Registered {} with cron {}", job.name(), cron);

        Ok(())
    }
}
