use chrono::{NaiveDateTime, Utc};
use entity::application::{ApplicationKind, ApplicationStatus};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn application(&self) -> ApplicationFixtures<'_> {
        ApplicationFixtures { setup: self }
    }
}

pub struct ApplicationFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> ApplicationFixtures<'a> {
    /// Insert an application created now.
    pub async fn insert_application(
        &self,
        author_id: i32,
        kind: ApplicationKind,
        status: ApplicationStatus,
        data: serde_json::Value,
    ) -> Result<entity::application::Model, TestError> {
        self.insert_application_at(author_id, kind, status, data, Utc::now().naive_utc())
            .await
    }

    /// Insert an application with an explicit creation timestamp, used to place history
    /// inside or outside quota and cooldown windows.
    pub async fn insert_application_at(
        &self,
        author_id: i32,
        kind: ApplicationKind,
        status: ApplicationStatus,
        data: serde_json::Value,
        created_at: NaiveDateTime,
    ) -> Result<entity::application::Model, TestError> {
        Ok(
            entity::prelude::Application::insert(entity::application::ActiveModel {
                author_id: ActiveValue::Set(author_id),
                kind: ActiveValue::Set(kind),
                status: ActiveValue::Set(status),
                data: ActiveValue::Set(data),
                status_history: ActiveValue::Set(serde_json::json!([])),
                reviewer_id: ActiveValue::Set(None),
                created_at: ActiveValue::Set(created_at),
                updated_at: ActiveValue::Set(created_at),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
