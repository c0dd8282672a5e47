use chrono::NaiveDateTime;
use entity::roster_user::{Role, UserStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[schema(value_type = String, example = "member")]
    pub role: Role,
    #[schema(value_type = String, example = "active")]
    pub status: UserStatus,
    pub primary_department_id: Option<i32>,
    pub secondary_department_id: Option<i32>,
    pub division: Option<String>,
    pub rank: Option<String>,
    pub warnings: i32,
    pub monthly_warnings: i32,
    pub created_at: NaiveDateTime,
}

impl From<entity::roster_user::Model> for UserDto {
    fn from(user: entity::roster_user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            status: user.status,
            primary_department_id: user.primary_department_id,
            secondary_department_id: user.secondary_department_id,
            division: user.division,
            rank: user.rank,
            warnings: user.warnings,
            monthly_warnings: user.monthly_warnings,
            created_at: user.created_at,
        }
    }
}

/// Body for completing registration after signing in with the auth provider
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterDto {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateRoleDto {
    #[schema(value_type = String, example = "supervisor")]
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WarningDto {
    pub reason: String,
}
