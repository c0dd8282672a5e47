//! Database model type aliases.

/// Registered community member, see `entity::roster_user::Model`.
pub type UserModel = entity::roster_user::Model;

/// Submitted application with its JSON payload and status history.
pub type ApplicationModel = entity::application::Model;

pub type NotificationModel = entity::notification::Model;

pub type ExamSessionModel = entity::exam_session::Model;
