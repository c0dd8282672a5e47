use super::*;

/// Expect the first run to insert a row for the job
#[tokio::test]
async fn inserts_first_run() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SchedulerRun)
        .build()
        .await?;
    let ran_at = Utc::now().naive_utc();

    let run_repo = SchedulerRunRepository::new(&test.db);
    let result = run_repo.record_run("monthly_reset", ran_at).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let run = run_repo.find_by_job("monthly_reset").await?.unwrap();
    assert_eq!(run.last_run_at, ran_at);

    Ok(())
}

/// Expect a later run to overwrite the timestamp instead of adding a row
#[tokio::test]
async fn overwrites_previous_run() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SchedulerRun)
        .build()
        .await?;
    let first = Utc::now().naive_utc() - Duration::days(1);
    let second = Utc::now().naive_utc();

    let run_repo = SchedulerRunRepository::new(&test.db);
    run_repo.record_run("leave_sweep", first).await?;
    run_repo.record_run("leave_sweep", second).await?;

    let runs = run_repo.list().await?;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].job, "leave_sweep");
    assert_eq!(runs[0].last_run_at, second);

    Ok(())
}
