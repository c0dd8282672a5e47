use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Community role, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[sea_orm(string_value = "candidate")]
    Candidate,
    #[sea_orm(string_value = "member")]
    Member,
    #[sea_orm(string_value = "supervisor")]
    Supervisor,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Role {
    /// Privilege level used for "at least" role checks.
    pub fn level(self) -> u8 {
        match self {
            Role::Candidate => 0,
            Role::Member => 1,
            Role::Supervisor => 2,
            Role::Admin => 3,
        }
    }

    pub fn at_least(self, other: Role) -> bool {
        self.level() >= other.level()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "on_leave")]
    OnLeave,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roster_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Subject claim issued by the external auth provider
    #[sea_orm(unique)]
    pub auth_id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub primary_department_id: Option<i32>,
    pub secondary_department_id: Option<i32>,
    pub division: Option<String>,
    pub rank: Option<String>,
    pub warnings: i32,
    pub monthly_warnings: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::application::Entity")]
    Application,
    #[sea_orm(has_many = "super::character::Entity")]
    Character,
    #[sea_orm(has_many = "super::notification::Entity")]
    Notification,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl Related<super::character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Character.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
