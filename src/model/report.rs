//! Reports, support tickets and complaints.

use chrono::NaiveDateTime;
use entity::{complaint::ComplaintStatus, report::ReportStatus, support_ticket::TicketStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportDto {
    pub id: i32,
    pub author_id: i32,
    pub department_id: Option<i32>,
    pub title: String,
    pub content: String,
    #[schema(value_type = String, example = "open")]
    pub status: ReportStatus,
    pub created_at: NaiveDateTime,
}

impl From<entity::report::Model> for ReportDto {
    fn from(report: entity::report::Model) -> Self {
        Self {
            id: report.id,
            author_id: report.author_id,
            department_id: report.department_id,
            title: report.title,
            content: report.content,
            status: report.status,
            created_at: report.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateReportDto {
    pub title: String,
    pub content: String,
    pub department_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateReportStatusDto {
    #[schema(value_type = String, example = "reviewed")]
    pub status: ReportStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketDto {
    pub id: i32,
    pub author_id: i32,
    pub subject: String,
    pub message: String,
    #[schema(value_type = String, example = "open")]
    pub status: TicketStatus,
    pub response: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::support_ticket::Model> for TicketDto {
    fn from(ticket: entity::support_ticket::Model) -> Self {
        Self {
            id: ticket.id,
            author_id: ticket.author_id,
            subject: ticket.subject,
            message: ticket.message,
            status: ticket.status,
            response: ticket.response,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTicketDto {
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateTicketDto {
    #[schema(value_type = String, example = "closed")]
    pub status: TicketStatus,
    pub response: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComplaintDto {
    pub id: i32,
    pub author_id: i32,
    pub target_user_id: Option<i32>,
    pub subject: String,
    pub message: String,
    #[schema(value_type = String, example = "open")]
    pub status: ComplaintStatus,
    pub resolution: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::complaint::Model> for ComplaintDto {
    fn from(complaint: entity::complaint::Model) -> Self {
        Self {
            id: complaint.id,
            author_id: complaint.author_id,
            target_user_id: complaint.target_user_id,
            subject: complaint.subject,
            message: complaint.message,
            status: complaint.status,
            resolution: complaint.resolution,
            created_at: complaint.created_at,
            updated_at: complaint.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateComplaintDto {
    pub target_user_id: Option<i32>,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateComplaintDto {
    #[schema(value_type = String, example = "resolved")]
    pub status: ComplaintStatus,
    pub resolution: Option<String>,
}
