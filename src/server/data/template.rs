use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct TemplateRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TemplateRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        created_by: i32,
        name: String,
        description: Option<String>,
        department_id: Option<i32>,
        fields: serde_json::Value,
    ) -> Result<entity::report_template::Model, DbErr> {
        let template = entity::report_template::ActiveModel {
            department_id: ActiveValue::Set(department_id),
            name: ActiveValue::Set(name),
            description: ActiveValue::Set(description),
            fields: ActiveValue::Set(fields),
            active: ActiveValue::Set(true),
            created_by: ActiveValue::Set(created_by),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        template.insert(self.db).await
    }

    pub async fn find_by_id(
        &self,
        template_id: i32,
    ) -> Result<Option<entity::report_template::Model>, DbErr> {
        entity::prelude::ReportTemplate::find_by_id(template_id)
            .one(self.db)
            .await
    }

    pub async fn list_active(&self) -> Result<Vec<entity::report_template::Model>, DbErr> {
        entity::prelude::ReportTemplate::find()
            .filter(entity::report_template::Column::Active.eq(true))
            .order_by_asc(entity::report_template::Column::Name)
            .all(self.db)
            .await
    }
}

pub struct FilledReportRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FilledReportRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        template_id: i32,
        author_id: i32,
        values: serde_json::Value,
    ) -> Result<entity::filled_report::Model, DbErr> {
        let report = entity::filled_report::ActiveModel {
            template_id: ActiveValue::Set(template_id),
            author_id: ActiveValue::Set(author_id),
            values: ActiveValue::Set(values),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        report.insert(self.db).await
    }

    pub async fn list_by_template(
        &self,
        template_id: i32,
    ) -> Result<Vec<entity::filled_report::Model>, DbErr> {
        entity::prelude::FilledReport::find()
            .filter(entity::filled_report::Column::TemplateId.eq(template_id))
            .order_by_desc(entity::filled_report::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn list_by_author(
        &self,
        author_id: i32,
    ) -> Result<Vec<entity::filled_report::Model>, DbErr> {
        entity::prelude::FilledReport::find()
            .filter(entity::filled_report::Column::AuthorId.eq(author_id))
            .order_by_desc(entity::filled_report::Column::CreatedAt)
            .all(self.db)
            .await
    }
}
