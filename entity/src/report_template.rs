use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "report_template")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub department_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    /// Array of field definitions
    pub fields: Json,
    pub active: bool,
    pub created_by: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::filled_report::Entity")]
    FilledReport,
}

impl Related<super::filled_report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilledReport.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
