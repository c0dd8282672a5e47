use sea_orm::DatabaseConnection;

use crate::server::{
    data::notification::NotificationRepository, error::Error, model::db::NotificationModel,
    service::retry::RetryContext,
};

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<NotificationModel>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("notification list", move || async move {
                Ok(NotificationRepository::new(db).list_by_user(user_id).await?)
            })
            .await
    }

    pub async fn mark_read(
        &self,
        user_id: i32,
        notification_id: i32,
    ) -> Result<NotificationModel, Error> {
        NotificationRepository::new(self.db)
            .mark_read(notification_id, user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Notification {}", notification_id)))
    }

    /// Returns the number of notifications that were unread
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, Error> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }
}
