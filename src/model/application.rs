use chrono::{NaiveDate, NaiveDateTime};
use entity::application::{ApplicationKind, ApplicationStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Kind-specific application payload.
///
/// The `kind` tag doubles as the application kind, so a submission can never carry a payload
/// that does not match its kind. The serialized form is what gets stored in the `data` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApplicationData {
    Entry {
        department_id: i32,
        character_name: String,
        motivation: String,
    },
    Leave {
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: String,
    },
    TransferDept {
        target_department_id: i32,
        reason: String,
    },
    TransferDiv {
        target_division: String,
        reason: String,
    },
    Promotion {
        target_rank: String,
        reason: String,
    },
    Qualification {
        qualification: String,
        reason: String,
    },
    JointPrimary {
        secondary_department_id: i32,
        reason: String,
    },
    JointSecondary {
        secondary_department_id: i32,
        reason: String,
    },
}

impl ApplicationData {
    pub fn kind(&self) -> ApplicationKind {
        match self {
            ApplicationData::Entry { .. } => ApplicationKind::Entry,
            ApplicationData::Leave { .. } => ApplicationKind::Leave,
            ApplicationData::TransferDept { .. } => ApplicationKind::TransferDept,
            ApplicationData::TransferDiv { .. } => ApplicationKind::TransferDiv,
            ApplicationData::Promotion { .. } => ApplicationKind::Promotion,
            ApplicationData::Qualification { .. } => ApplicationKind::Qualification,
            ApplicationData::JointPrimary { .. } => ApplicationKind::JointPrimary,
            ApplicationData::JointSecondary { .. } => ApplicationKind::JointSecondary,
        }
    }

    /// Inclusive leave window, `None` for every other kind.
    pub fn leave_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            ApplicationData::Leave {
                start_date,
                end_date,
                ..
            } => Some((*start_date, *end_date)),
            _ => None,
        }
    }
}

/// One entry of an application's append-only status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusChange {
    #[schema(value_type = String)]
    pub from: ApplicationStatus,
    #[schema(value_type = String)]
    pub to: ApplicationStatus,
    /// Reviewer who made the change, `None` for system changes such as exam grading
    pub changed_by: Option<i32>,
    pub comment: Option<String>,
    pub changed_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationDto {
    pub id: i32,
    pub author_id: i32,
    #[schema(value_type = String, example = "leave")]
    pub kind: ApplicationKind,
    #[schema(value_type = String, example = "pending")]
    pub status: ApplicationStatus,
    pub data: ApplicationData,
    pub status_history: Vec<StatusChange>,
    pub reviewer_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdvanceStatusDto {
    #[schema(value_type = String, example = "approved")]
    pub status: ApplicationStatus,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
pub struct EligibilityQuery {
    #[param(value_type = String, example = "promotion")]
    pub kind: ApplicationKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
pub struct ReviewQuery {
    #[param(value_type = Option<String>, example = "pending")]
    pub status: Option<ApplicationStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EligibilityDto {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl TryFrom<entity::application::Model> for ApplicationDto {
    type Error = serde_json::Error;

    fn try_from(application: entity::application::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: application.id,
            author_id: application.author_id,
            kind: application.kind,
            status: application.status,
            data: serde_json::from_value(application.data)?,
            status_history: serde_json::from_value(application.status_history)?,
            reviewer_id: application.reviewer_id,
            created_at: application.created_at,
            updated_at: application.updated_at,
        })
    }
}
