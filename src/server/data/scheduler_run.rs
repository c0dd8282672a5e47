use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QuerySelect,
};

/// Last-run bookkeeping for scheduled jobs
pub struct SchedulerRunRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SchedulerRunRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_job(
        &self,
        job: &str,
    ) -> Result<Option<entity::scheduler_run::Model>, DbErr> {
        entity::prelude::SchedulerRun::find()
            .filter(entity::scheduler_run::Column::Job.eq(job))
            .one(self.db)
            .await
    }

    /// Like [`Self::find_by_job`] but locks the row until the surrounding transaction ends.
    ///
    /// Backends without row locks, such as SQLite, read without locking.
    pub async fn find_by_job_for_update(
        &self,
        job: &str,
    ) -> Result<Option<entity::scheduler_run::Model>, DbErr> {
        entity::prelude::SchedulerRun::find()
            .filter(entity::scheduler_run::Column::Job.eq(job))
            .lock_exclusive()
            .one(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::scheduler_run::Model>, DbErr> {
        entity::prelude::SchedulerRun::find().all(self.db).await
    }

    /// Inserts or overwrites the last run timestamp of a job
    pub async fn record_run(&self, job: &str, ran_at: NaiveDateTime) -> Result<(), DbErr> {
        let run = entity::scheduler_run::ActiveModel {
            job: ActiveValue::Set(job.to_string()),
            last_run_at: ActiveValue::Set(ran_at),
            ..Default::default()
        };

        entity::prelude::SchedulerRun::insert(run)
            .on_conflict(
                OnConflict::column(entity::scheduler_run::Column::Job)
                    .update_column(entity::scheduler_run::Column::LastRunAt)
                    .to_owned(),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }
}
