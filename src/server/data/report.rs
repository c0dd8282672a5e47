use chrono::Utc;
use entity::report::ReportStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::report::CreateReportDto;

pub struct ReportRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReportRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        author_id: i32,
        input: CreateReportDto,
    ) -> Result<entity::report::Model, DbErr> {
        let report = entity::report::ActiveModel {
            author_id: ActiveValue::Set(author_id),
            department_id: ActiveValue::Set(input.department_id),
            title: ActiveValue::Set(input.title),
            content: ActiveValue::Set(input.content),
            status: ActiveValue::Set(ReportStatus::Open),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        report.insert(self.db).await
    }

    pub async fn list_by_author(
        &self,
        author_id: i32,
    ) -> Result<Vec<entity::report::Model>, DbErr> {
        entity::prelude::Report::find()
            .filter(entity::report::Column::AuthorId.eq(author_id))
            .order_by_desc(entity::report::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::report::Model>, DbErr> {
        entity::prelude::Report::find()
            .order_by_desc(entity::report::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Sets the status of a report, `None` if it doesn't exist
    pub async fn update_status(
        &self,
        report_id: i32,
        status: ReportStatus,
    ) -> Result<Option<entity::report::Model>, DbErr> {
        let Some(report) = entity::prelude::Report::find_by_id(report_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut report = report.into_active_model();
        report.status = ActiveValue::Set(status);

        Ok(Some(report.update(self.db).await?))
    }
}
