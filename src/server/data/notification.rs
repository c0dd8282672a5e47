use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        kind: &str,
        title: &str,
        message: &str,
    ) -> Result<entity::notification::Model, DbErr> {
        let notification = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            title: ActiveValue::Set(title.to_string()),
            message: ActiveValue::Set(message.to_string()),
            kind: ActiveValue::Set(kind.to_string()),
            read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        notification.insert(self.db).await
    }

    /// Notifications of a user, newest first
    pub async fn list_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::notification::Model>, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .all(self.db)
            .await
    }

    /// Marks a notification read, `None` if it doesn't exist or belongs to another user
    pub async fn mark_read(
        &self,
        notification_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::notification::Model>, DbErr> {
        let Some(notification) = entity::prelude::Notification::find_by_id(notification_id)
            .filter(entity::notification::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut notification = notification.into_active_model();
        notification.read = ActiveValue::Set(true);

        Ok(Some(notification.update(self.db).await?))
    }

    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .col_expr(entity::notification::Column::Read, Expr::value(true))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Read.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
