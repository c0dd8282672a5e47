use chrono::Utc;
use entity::{cad_call::CallStatus, cad_unit::UnitStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::cad::{CreateCallDto, UpdateCallDto};

pub struct CadRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CadRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create_unit(
        &self,
        callsign: String,
        user_id: Option<i32>,
        department_id: Option<i32>,
    ) -> Result<entity::cad_unit::Model, DbErr> {
        let unit = entity::cad_unit::ActiveModel {
            callsign: ActiveValue::Set(callsign),
            user_id: ActiveValue::Set(user_id),
            department_id: ActiveValue::Set(department_id),
            status: ActiveValue::Set(UnitStatus::Available),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        unit.insert(self.db).await
    }

    pub async fn find_unit(&self, unit_id: i32) -> Result<Option<entity::cad_unit::Model>, DbErr> {
        entity::prelude::CadUnit::find_by_id(unit_id)
            .one(self.db)
            .await
    }

    pub async fn find_unit_by_callsign(
        &self,
        callsign: &str,
    ) -> Result<Option<entity::cad_unit::Model>, DbErr> {
        entity::prelude::CadUnit::find()
            .filter(entity::cad_unit::Column::Callsign.eq(callsign))
            .one(self.db)
            .await
    }

    pub async fn list_units(&self) -> Result<Vec<entity::cad_unit::Model>, DbErr> {
        entity::prelude::CadUnit::find()
            .order_by_asc(entity::cad_unit::Column::Callsign)
            .all(self.db)
            .await
    }

    pub async fn update_unit_status(
        &self,
        unit: entity::cad_unit::Model,
        status: UnitStatus,
    ) -> Result<entity::cad_unit::Model, DbErr> {
        let mut unit = unit.into_active_model();
        unit.status = ActiveValue::Set(status);
        unit.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        unit.update(self.db).await
    }

    pub async fn search_units(&self, query: &str) -> Result<Vec<entity::cad_unit::Model>, DbErr> {
        entity::prelude::CadUnit::find()
            .filter(entity::cad_unit::Column::Callsign.contains(query))
            .order_by_asc(entity::cad_unit::Column::Callsign)
            .all(self.db)
            .await
    }

    pub async fn create_call(
        &self,
        created_by: i32,
        input: CreateCallDto,
    ) -> Result<entity::cad_call::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let call = entity::cad_call::ActiveModel {
            title: ActiveValue::Set(input.title),
            description: ActiveValue::Set(input.description),
            location: ActiveValue::Set(input.location),
            priority: ActiveValue::Set(input.priority),
            status: ActiveValue::Set(CallStatus::Pending),
            assigned_unit_id: ActiveValue::Set(None),
            created_by: ActiveValue::Set(created_by),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        call.insert(self.db).await
    }

    pub async fn find_call(&self, call_id: i32) -> Result<Option<entity::cad_call::Model>, DbErr> {
        entity::prelude::CadCall::find_by_id(call_id)
            .one(self.db)
            .await
    }

    /// Calls, most urgent first
    pub async fn list_calls(&self) -> Result<Vec<entity::cad_call::Model>, DbErr> {
        entity::prelude::CadCall::find()
            .order_by_asc(entity::cad_call::Column::Priority)
            .order_by_desc(entity::cad_call::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Applies the fields present in `input`
    pub async fn update_call(
        &self,
        call: entity::cad_call::Model,
        input: UpdateCallDto,
    ) -> Result<entity::cad_call::Model, DbErr> {
        let mut call = call.into_active_model();
        if let Some(status) = input.status {
            call.status = ActiveValue::Set(status);
        }
        if let Some(unit_id) = input.assigned_unit_id {
            call.assigned_unit_id = ActiveValue::Set(Some(unit_id));
        }
        if let Some(priority) = input.priority {
            call.priority = ActiveValue::Set(priority);
        }
        if let Some(description) = input.description {
            call.description = ActiveValue::Set(Some(description));
        }
        call.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        call.update(self.db).await
    }

    /// Calls whose title or location contains `query`
    pub async fn search_calls(&self, query: &str) -> Result<Vec<entity::cad_call::Model>, DbErr> {
        entity::prelude::CadCall::find()
            .filter(
                Condition::any()
                    .add(entity::cad_call::Column::Title.contains(query))
                    .add(entity::cad_call::Column::Location.contains(query)),
            )
            .order_by_asc(entity::cad_call::Column::Priority)
            .all(self.db)
            .await
    }
}
