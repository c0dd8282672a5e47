use chrono::Utc;
use entity::complaint::ComplaintStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::report::{CreateComplaintDto, UpdateComplaintDto};

pub struct ComplaintRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ComplaintRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        author_id: i32,
        input: CreateComplaintDto,
    ) -> Result<entity::complaint::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let complaint = entity::complaint::ActiveModel {
            author_id: ActiveValue::Set(author_id),
            target_user_id: ActiveValue::Set(input.target_user_id),
            subject: ActiveValue::Set(input.subject),
            message: ActiveValue::Set(input.message),
            status: ActiveValue::Set(ComplaintStatus::Open),
            resolution: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        complaint.insert(self.db).await
    }

    pub async fn list_by_author(
        &self,
        author_id: i32,
    ) -> Result<Vec<entity::complaint::Model>, DbErr> {
        entity::prelude::Complaint::find()
            .filter(entity::complaint::Column::AuthorId.eq(author_id))
            .order_by_desc(entity::complaint::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::complaint::Model>, DbErr> {
        entity::prelude::Complaint::find()
            .order_by_desc(entity::complaint::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        complaint_id: i32,
        input: UpdateComplaintDto,
    ) -> Result<Option<entity::complaint::Model>, DbErr> {
        let Some(complaint) = entity::prelude::Complaint::find_by_id(complaint_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut complaint = complaint.into_active_model();
        complaint.status = ActiveValue::Set(input.status);
        if input.resolution.is_some() {
            complaint.resolution = ActiveValue::Set(input.resolution);
        }
        complaint.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(complaint.update(self.db).await?))
    }
}
