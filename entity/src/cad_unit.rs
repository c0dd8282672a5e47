use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "busy")]
    Busy,
    #[sea_orm(string_value = "en_route")]
    EnRoute,
    #[sea_orm(string_value = "on_scene")]
    OnScene,
    #[sea_orm(string_value = "out_of_service")]
    OutOfService,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cad_unit")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub callsign: String,
    pub user_id: Option<i32>,
    pub department_id: Option<i32>,
    pub status: UnitStatus,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
