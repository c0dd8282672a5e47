use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "exam")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub department_id: Option<i32>,
    /// Questions including their correct answers, never sent to examinees as-is
    pub questions: Json,
    /// Percentage required to pass, 0 to 100
    pub pass_score: i32,
    pub time_limit_minutes: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
