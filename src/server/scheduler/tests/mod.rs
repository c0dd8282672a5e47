
use chrono::{Duration, NaiveDate, Utc};
use entity::{
    application::{ApplicationKind, ApplicationStatus},
    roster_user::UserStatus,
};
use roster_test_utils::prelude::*;

use crate::model::application::ApplicationData;

fn leave(start: NaiveDate, end: NaiveDate) -> Result<serde_json::Value, TestError> {
    Ok(serde_json::to_value(ApplicationData::Leave {
        start_date: start,
        end_date: end,
        reason: "Holiday".to_string(),
    })?)
}

async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_application_tables()
        .with_table(entity::prelude::SchedulerRun)
        .build()
        .await
}
