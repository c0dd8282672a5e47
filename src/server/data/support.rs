use chrono::Utc;
use entity::support_ticket::TicketStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::report::{CreateTicketDto, UpdateTicketDto};

pub struct SupportTicketRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SupportTicketRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        author_id: i32,
        input: CreateTicketDto,
    ) -> Result<entity::support_ticket::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let ticket = entity::support_ticket::ActiveModel {
            author_id: ActiveValue::Set(author_id),
            subject: ActiveValue::Set(input.subject),
            message: ActiveValue::Set(input.message),
            status: ActiveValue::Set(TicketStatus::Open),
            response: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        ticket.insert(self.db).await
    }

    pub async fn list_by_author(
        &self,
        author_id: i32,
    ) -> Result<Vec<entity::support_ticket::Model>, DbErr> {
        entity::prelude::SupportTicket::find()
            .filter(entity::support_ticket::Column::AuthorId.eq(author_id))
            .order_by_desc(entity::support_ticket::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::support_ticket::Model>, DbErr> {
        entity::prelude::SupportTicket::find()
            .order_by_desc(entity::support_ticket::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Sets status and, when given, the staff response; `None` if the ticket doesn't exist
    pub async fn update(
        &self,
        ticket_id: i32,
        input: UpdateTicketDto,
    ) -> Result<Option<entity::support_ticket::Model>, DbErr> {
        let Some(ticket) = entity::prelude::SupportTicket::find_by_id(ticket_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut ticket = ticket.into_active_model();
        ticket.status = ActiveValue::Set(input.status);
        if input.response.is_some() {
            ticket.response = ActiveValue::Set(input.response);
        }
        ticket.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(ticket.update(self.db).await?))
    }
}
