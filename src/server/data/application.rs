use chrono::Utc;
use entity::application::{ApplicationKind, ApplicationStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct ApplicationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ApplicationRepository<'a, C> {
    /// Creates a new instance of [`ApplicationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a pending application with an empty status history
    pub async fn create(
        &self,
        author_id: i32,
        kind: ApplicationKind,
        data: serde_json::Value,
    ) -> Result<entity::application::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let application = entity::application::ActiveModel {
            author_id: ActiveValue::Set(author_id),
            kind: ActiveValue::Set(kind),
            status: ActiveValue::Set(ApplicationStatus::Pending),
            data: ActiveValue::Set(data),
            status_history: ActiveValue::Set(serde_json::Value::Array(Vec::new())),
            reviewer_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        application.insert(self.db).await
    }

    pub async fn find_by_id(
        &self,
        application_id: i32,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        entity::prelude::Application::find_by_id(application_id)
            .one(self.db)
            .await
    }

    /// Full application history of a user, newest first
    pub async fn find_by_author(
        &self,
        author_id: i32,
    ) -> Result<Vec<entity::application::Model>, DbErr> {
        entity::prelude::Application::find()
            .filter(entity::application::Column::AuthorId.eq(author_id))
            .order_by_desc(entity::application::Column::CreatedAt)
            .order_by_desc(entity::application::Column::Id)
            .all(self.db)
            .await
    }

    /// Applications for the review queue, oldest first, optionally filtered by status
    pub async fn list_by_status(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<entity::application::Model>, DbErr> {
        let mut query = entity::prelude::Application::find();
        if let Some(status) = status {
            query = query.filter(entity::application::Column::Status.eq(status));
        }

        query
            .order_by_asc(entity::application::Column::CreatedAt)
            .order_by_asc(entity::application::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find_by_kind_and_statuses(
        &self,
        kind: ApplicationKind,
        statuses: &[ApplicationStatus],
    ) -> Result<Vec<entity::application::Model>, DbErr> {
        entity::prelude::Application::find()
            .filter(entity::application::Column::Kind.eq(kind))
            .filter(entity::application::Column::Status.is_in(statuses.iter().copied()))
            .all(self.db)
            .await
    }

    /// Stores a new status together with the already-extended history
    pub async fn update_status(
        &self,
        application: entity::application::Model,
        status: ApplicationStatus,
        reviewer_id: Option<i32>,
        status_history: serde_json::Value,
    ) -> Result<entity::application::Model, DbErr> {
        let mut application = application.into_active_model();
        application.status = ActiveValue::Set(status);
        application.status_history = ActiveValue::Set(status_history);
        if reviewer_id.is_some() {
            application.reviewer_id = ActiveValue::Set(reviewer_id);
        }
        application.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        application.update(self.db).await
    }
}
