use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub id: i32,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub read: bool,
    pub created_at: NaiveDateTime,
}

impl From<entity::notification::Model> for NotificationDto {
    fn from(notification: entity::notification::Model) -> Self {
        Self {
            id: notification.id,
            title: notification.title,
            message: notification.message,
            kind: notification.kind,
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarkedReadDto {
    pub updated: u64,
}
