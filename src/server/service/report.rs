//! Member reports, support tickets and complaints.
//!
//! All three follow the same shape: members file and list their own records, staff list every
//! record and update its status. Staff updates to tickets and complaints notify the author.

use entity::{complaint::ComplaintStatus, report::ReportStatus, support_ticket::TicketStatus};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::report::{
        CreateComplaintDto, CreateReportDto, CreateTicketDto, UpdateComplaintDto, UpdateTicketDto,
    },
    server::{
        data::{
            complaint::ComplaintRepository, department::DepartmentRepository,
            notification::NotificationRepository, report::ReportRepository,
            support::SupportTicketRepository, user::UserRepository,
        },
        error::Error,
        service::retry::RetryContext,
    },
};

pub const SUPPORT_NOTIFICATION_KIND: &str = "support_ticket";
pub const COMPLAINT_NOTIFICATION_KIND: &str = "complaint";

fn require_text(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{} must not be empty", field)));
    }

    Ok(())
}

pub struct ReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a report, optionally addressed to a department.
    ///
    /// # Arguments
    /// - `author_id`: Member filing the report
    /// - `input`: Title, content and optional department
    ///
    /// # Returns
    /// - `Ok(Model)`: The stored report, status `open`
    /// - `Err(Error::Validation)`: Empty title or content, or an unknown department
    pub async fn create(
        &self,
        author_id: i32,
        input: CreateReportDto,
    ) -> Result<entity::report::Model, Error> {
        require_text("title", &input.title)?;
        require_text("content", &input.content)?;

        if let Some(department_id) = input.department_id {
            if DepartmentRepository::new(self.db)
                .find_by_id(department_id)
                .await?
                .is_none()
            {
                return Err(Error::validation(format!(
                    "Department {} does not exist",
                    department_id
                )));
            }
        }

        let report = ReportRepository::new(self.db).create(author_id, input).await?;

        tracing::debug!(report_id = report.id, author_id, "Report filed");

        Ok(report)
    }

    pub async fn list_own(&self, author_id: i32) -> Result<Vec<entity::report::Model>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("own report list", move || async move {
                Ok(ReportRepository::new(db).list_by_author(author_id).await?)
            })
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<entity::report::Model>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("report list", move || async move {
                Ok(ReportRepository::new(db).list().await?)
            })
            .await
    }

    /// Sets a report's status; reports carry no author notification
    pub async fn update_status(
        &self,
        report_id: i32,
        status: ReportStatus,
    ) -> Result<entity::report::Model, Error> {
        ReportRepository::new(self.db)
            .update_status(report_id, status)
            .await?
            .ok_or_else(|| Error::not_found(format!("Report {}", report_id)))
    }
}

pub struct SupportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SupportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a support ticket; subject and message must not be empty
    pub async fn create(
        &self,
        author_id: i32,
        input: CreateTicketDto,
    ) -> Result<entity::support_ticket::Model, Error> {
        require_text("subject", &input.subject)?;
        require_text("message", &input.message)?;

        let ticket = SupportTicketRepository::new(self.db)
            .create(author_id, input)
            .await?;

        tracing::debug!(ticket_id = ticket.id, author_id, "Support ticket opened");

        Ok(ticket)
    }

    pub async fn list_own(
        &self,
        author_id: i32,
    ) -> Result<Vec<entity::support_ticket::Model>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("own ticket list", move || async move {
                Ok(SupportTicketRepository::new(db)
                    .list_by_author(author_id)
                    .await?)
            })
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<entity::support_ticket::Model>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("ticket list", move || async move {
                Ok(SupportTicketRepository::new(db).list().await?)
            })
            .await
    }

    /// Updates status and response, notifying the author in the same transaction.
    ///
    /// # Arguments
    /// - `ticket_id`: Ticket to update
    /// - `input`: New status and an optional staff response
    ///
    /// # Returns
    /// - `Ok(Model)`: The updated ticket
    /// - `Err(Error::NotFound)`: No such ticket
    pub async fn update(
        &self,
        ticket_id: i32,
        input: UpdateTicketDto,
    ) -> Result<entity::support_ticket::Model, Error> {
        let txn = self.db.begin().await?;

        let Some(ticket) = SupportTicketRepository::new(&txn)
            .update(ticket_id, input)
            .await?
        else {
            return Err(Error::not_found(format!("Support ticket {}", ticket_id)));
        };

        let mut message = format!(
            "Your ticket \"{}\" is now {}.",
            ticket.subject,
            ticket_status_label(ticket.status)
        );
        if let Some(response) = &ticket.response {
            message.push_str(&format!(" Response: {}", response));
        }

        NotificationRepository::new(&txn)
            .create(
                ticket.author_id,
                SUPPORT_NOTIFICATION_KIND,
                "Support ticket updated",
                &message,
            )
            .await?;

        txn.commit().await?;

        Ok(ticket)
    }
}

pub struct ComplaintService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ComplaintService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a complaint, optionally against another registered user.
    ///
    /// # Returns
    /// - `Ok(Model)`: The stored complaint, status `open`
    /// - `Err(Error::Validation)`: Empty subject or message, a complaint about the author
    ///   themselves, or an unknown target user
    pub async fn create(
        &self,
        author_id: i32,
        input: CreateComplaintDto,
    ) -> Result<entity::complaint::Model, Error> {
        require_text("subject", &input.subject)?;
        require_text("message", &input.message)?;

        if let Some(target_user_id) = input.target_user_id {
            if target_user_id == author_id {
                return Err(Error::validation("You cannot file a complaint about yourself"));
            }
            if UserRepository::new(self.db)
                .find_by_id(target_user_id)
                .await?
                .is_none()
            {
                return Err(Error::validation(format!(
                    "User {} does not exist",
                    target_user_id
                )));
            }
        }

        let complaint = ComplaintRepository::new(self.db)
            .create(author_id, input)
            .await?;

        tracing::debug!(complaint_id = complaint.id, author_id, "Complaint filed");

        Ok(complaint)
    }

    pub async fn list_own(&self, author_id: i32) -> Result<Vec<entity::complaint::Model>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("own complaint list", move || async move {
                Ok(ComplaintRepository::new(db).list_by_author(author_id).await?)
            })
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<entity::complaint::Model>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("complaint list", move || async move {
                Ok(ComplaintRepository::new(db).list().await?)
            })
            .await
    }

    /// Updates status and resolution and notifies the author, like [`SupportService::update`]
    pub async fn update(
        &self,
        complaint_id: i32,
        input: UpdateComplaintDto,
    ) -> Result<entity::complaint::Model, Error> {
        let txn = self.db.begin().await?;

        let Some(complaint) = ComplaintRepository::new(&txn)
            .update(complaint_id, input)
            .await?
        else {
            return Err(Error::not_found(format!("Complaint {}", complaint_id)));
        };

        let mut message = format!(
            "Your complaint \"{}\" is now {}.",
            complaint.subject,
            complaint_status_label(complaint.status)
        );
        if let Some(resolution) = &complaint.resolution {
            message.push_str(&format!(" Resolution: {}", resolution));
        }

        NotificationRepository::new(&txn)
            .create(
                complaint.author_id,
                COMPLAINT_NOTIFICATION_KIND,
                "Complaint updated",
                &message,
            )
            .await?;

        txn.commit().await?;

        Ok(complaint)
    }
}

fn ticket_status_label(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Open => "open",
        TicketStatus::InProgress => "in progress",
        TicketStatus::Closed => "closed",
    }
}

fn complaint_status_label(status: ComplaintStatus) -> &'static str {
    match status {
        ComplaintStatus::Open => "open",
        ComplaintStatus::Reviewing => "under review",
        ComplaintStatus::Resolved => "resolved",
        ComplaintStatus::Dismissed => "dismissed",
    }
}
