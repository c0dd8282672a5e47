use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentDto {
    pub id: i32,
    pub name: String,
    pub short_name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<entity::department::Model> for DepartmentDto {
    fn from(department: entity::department::Model) -> Self {
        Self {
            id: department.id,
            name: department.name,
            short_name: department.short_name,
            description: department.description,
            created_at: department.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDepartmentDto {
    pub name: String,
    pub short_name: String,
    pub description: Option<String>,
}
