use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(24))")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationKind {
    #[sea_orm(string_value = "entry")]
    Entry,
    #[sea_orm(string_value = "leave")]
    Leave,
    #[sea_orm(string_value = "transfer_dept")]
    TransferDept,
    #[sea_orm(string_value = "transfer_div")]
    TransferDiv,
    #[sea_orm(string_value = "promotion")]
    Promotion,
    #[sea_orm(string_value = "qualification")]
    Qualification,
    #[sea_orm(string_value = "joint_primary")]
    JointPrimary,
    #[sea_orm(string_value = "joint_secondary")]
    JointSecondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(24))")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "test_required")]
    TestRequired,
    #[sea_orm(string_value = "test_failed")]
    TestFailed,
    #[sea_orm(string_value = "resolved")]
    Resolved,
    #[sea_orm(string_value = "closed")]
    Closed,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "application")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: i32,
    pub kind: ApplicationKind,
    pub status: ApplicationStatus,
    /// Kind-specific payload
    pub data: Json,
    /// Append-only list of status changes
    pub status_history: Json,
    pub reviewer_id: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::roster_user::Entity",
        from = "Column::AuthorId",
        to = "super::roster_user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::roster_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
