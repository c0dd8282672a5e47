use chrono::{DateTime, NaiveDateTime, Utc};
use entity::{cad_call::CallStatus, cad_unit::UnitStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnitDto {
    pub id: i32,
    pub callsign: String,
    pub user_id: Option<i32>,
    pub department_id: Option<i32>,
    #[schema(value_type = String, example = "available")]
    pub status: UnitStatus,
    pub updated_at: NaiveDateTime,
}

impl From<entity::cad_unit::Model> for UnitDto {
    fn from(unit: entity::cad_unit::Model) -> Self {
        Self {
            id: unit.id,
            callsign: unit.callsign,
            user_id: unit.user_id,
            department_id: unit.department_id,
            status: unit.status,
            updated_at: unit.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUnitDto {
    pub callsign: String,
    pub department_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUnitStatusDto {
    #[schema(value_type = String, example = "en_route")]
    pub status: UnitStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CallDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub priority: i32,
    #[schema(value_type = String, example = "pending")]
    pub status: CallStatus,
    pub assigned_unit_id: Option<i32>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::cad_call::Model> for CallDto {
    fn from(call: entity::cad_call::Model) -> Self {
        Self {
            id: call.id,
            title: call.title,
            description: call.description,
            location: call.location,
            priority: call.priority,
            status: call.status,
            assigned_unit_id: call.assigned_unit_id,
            created_by: call.created_by,
            created_at: call.created_at,
            updated_at: call.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCallDto {
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub priority: i32,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCallDto {
    #[schema(value_type = Option<String>, example = "active")]
    pub status: Option<CallStatus>,
    pub assigned_unit_id: Option<i32>,
    pub priority: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CadSearchDto {
    pub calls: Vec<CallDto>,
    pub units: Vec<UnitDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
pub struct SocketQuery {
    /// Bearer token, browsers cannot set headers on WebSocket upgrades
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAnnouncementDto {
    pub message: String,
}

/// Payload of the `announcement` event, also returned to the sender
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnnouncementDto {
    pub message: String,
    pub author_id: i32,
    pub author: String,
    pub sent_at: DateTime<Utc>,
}
