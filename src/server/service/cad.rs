//! Dispatch units and calls.
//!
//! Every write is broadcast to connected WebSocket clients after it is stored.

use chrono::Utc;
use entity::{cad_call::CallStatus, cad_unit::UnitStatus};
use sea_orm::DatabaseConnection;

use crate::{
    model::cad::{
        AnnouncementDto, CallDto, CreateCallDto, CreateUnitDto, UnitDto, UpdateCallDto,
    },
    server::{
        cad::{broadcaster::CadBroadcaster, message::EventKind},
        data::cad::CadRepository,
        error::Error,
        model::db::UserModel,
        service::retry::RetryContext,
    },
};

const PRIORITY_RANGE: std::ops::RangeInclusive<i32> = 1..=5;
const ANNOUNCEMENT_MAX_CHARS: usize = 500;

pub struct CadService<'a> {
    db: &'a DatabaseConnection,
    broadcaster: &'a CadBroadcaster,
}

impl<'a> CadService<'a> {
    pub fn new(db: &'a DatabaseConnection, broadcaster: &'a CadBroadcaster) -> Self {
        Self { db, broadcaster }
    }

    pub async fn list_units(&self) -> Result<Vec<entity::cad_unit::Model>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("CAD unit list", move || async move {
                Ok(CadRepository::new(db).list_units().await?)
            })
            .await
    }

    /// Registers a unit for `user_id` and broadcasts `unit_created`.
    ///
    /// The callsign is trimmed and upper-cased before the uniqueness check.
    ///
    /// # Arguments
    /// - `user_id`: Member operating the unit
    /// - `input`: Callsign and optional department
    ///
    /// # Returns
    /// - `Ok(Model)`: The stored unit
    /// - `Err(Error::Validation)`: Empty callsign
    /// - `Err(Error::Conflict)`: Callsign already in use
    pub async fn create_unit(
        &self,
        user_id: i32,
        input: CreateUnitDto,
    ) -> Result<entity::cad_unit::Model, Error> {
        let callsign = input.callsign.trim().to_uppercase();
        if callsign.is_empty() {
            return Err(Error::validation("Callsign must not be empty"));
        }

        let cad_repo = CadRepository::new(self.db);
        if cad_repo.find_unit_by_callsign(&callsign).await?.is_some() {
            return Err(Error::conflict(format!(
                "Callsign {} is already in use",
                callsign
            )));
        }

        let unit = cad_repo
            .create_unit(callsign, Some(user_id), input.department_id)
            .await?;

        self.publish(EventKind::UnitCreated, &UnitDto::from(unit.clone()))
            .await?;

        Ok(unit)
    }

    /// Sets a unit's status and broadcasts `unit_updated`, or `Error::NotFound` for an unknown unit
    pub async fn update_unit_status(
        &self,
        unit_id: i32,
        status: UnitStatus,
    ) -> Result<entity::cad_unit::Model, Error> {
        let cad_repo = CadRepository::new(self.db);

        let Some(unit) = cad_repo.find_unit(unit_id).await? else {
            return Err(Error::not_found(format!("Unit {}", unit_id)));
        };
        let unit = cad_repo.update_unit_status(unit, status).await?;

        self.publish(EventKind::UnitUpdated, &UnitDto::from(unit.clone()))
            .await?;

        Ok(unit)
    }

    pub async fn list_calls(&self) -> Result<Vec<entity::cad_call::Model>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("CAD call list", move || async move {
                Ok(CadRepository::new(db).list_calls().await?)
            })
            .await
    }

    /// Opens a call and broadcasts `call_created`.
    ///
    /// # Returns
    /// - `Ok(Model)`: The stored call, status `pending`
    /// - `Err(Error::Validation)`: Empty title or location, or a priority outside 1-5
    pub async fn create_call(
        &self,
        created_by: i32,
        input: CreateCallDto,
    ) -> Result<entity::cad_call::Model, Error> {
        if input.title.trim().is_empty() || input.location.trim().is_empty() {
            return Err(Error::validation("Call title and location must not be empty"));
        }
        check_priority(input.priority)?;

        let call = CadRepository::new(self.db)
            .create_call(created_by, input)
            .await?;

        tracing::info!(call_id = call.id, priority = call.priority, "CAD call created");

        self.publish(EventKind::CallCreated, &CallDto::from(call.clone()))
            .await?;

        Ok(call)
    }

    /// Applies a partial update; closing a call is announced as `call_closed`.
    ///
    /// # Arguments
    /// - `call_id`: Call to update
    /// - `input`: Fields to change, absent fields are left as they are
    ///
    /// # Returns
    /// - `Ok(Model)`: The updated call
    /// - `Err(Error::NotFound)`: No such call
    /// - `Err(Error::Validation)`: Priority outside 1-5 or an assigned unit that doesn't exist
    pub async fn update_call(
        &self,
        call_id: i32,
        input: UpdateCallDto,
    ) -> Result<entity::cad_call::Model, Error> {
        if let Some(priority) = input.priority {
            check_priority(priority)?;
        }

        let cad_repo = CadRepository::new(self.db);

        let Some(call) = cad_repo.find_call(call_id).await? else {
            return Err(Error::not_found(format!("Call {}", call_id)));
        };
        if let Some(unit_id) = input.assigned_unit_id {
            if cad_repo.find_unit(unit_id).await?.is_none() {
                return Err(Error::validation(format!("Unit {} does not exist", unit_id)));
            }
        }

        let call = cad_repo.update_call(call, input).await?;

        let kind = match call.status {
            CallStatus::Closed => EventKind::CallClosed,
            _ => EventKind::CallUpdated,
        };
        self.publish(kind, &CallDto::from(call.clone())).await?;

        Ok(call)
    }

    /// Substring search over call titles, call locations and unit callsigns
    pub async fn search(
        &self,
        query: &str,
    ) -> Result<(Vec<entity::cad_call::Model>, Vec<entity::cad_unit::Model>), Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::validation("Search query must not be empty"));
        }

        let cad_repo = CadRepository::new(self.db);
        let calls = cad_repo.search_calls(query).await?;
        let units = cad_repo.search_units(query).await?;

        Ok((calls, units))
    }

    /// Broadcasts a free-text message to every connected client on the general channel.
    ///
    /// Nothing is stored; clients that are not connected never see it.
    ///
    /// # Arguments
    /// - `author`: Supervisor sending the announcement
    /// - `message`: Text to send, at most 500 characters after trimming
    ///
    /// # Returns
    /// - `Ok(AnnouncementDto)`: The payload that was broadcast
    /// - `Err(Error::Validation)`: Empty or overlong message
    pub async fn announce(
        &self,
        author: &UserModel,
        message: String,
    ) -> Result<AnnouncementDto, Error> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::validation("Announcement must not be empty"));
        }
        if message.chars().count() > ANNOUNCEMENT_MAX_CHARS {
            return Err(Error::validation(format!(
                "Announcement must be at most {} characters",
                ANNOUNCEMENT_MAX_CHARS
            )));
        }

        let announcement = AnnouncementDto {
            message: message.to_string(),
            author_id: author.id,
            author: author.username.clone(),
            sent_at: Utc::now(),
        };

        self.publish(EventKind::Announcement, &announcement).await?;

        tracing::info!(author_id = author.id, "CAD announcement sent");

        Ok(announcement)
    }

    async fn publish<T: serde::Serialize>(&self, kind: EventKind, data: &T) -> Result<(), Error> {
        self.broadcaster
            .broadcast(kind, serde_json::to_value(data)?)
            .await;

        Ok(())
    }
}

fn check_priority(priority: i32) -> Result<(), Error> {
    if !PRIORITY_RANGE.contains(&priority) {
        return Err(Error::validation(format!(
            "Priority must be between {} and {}",
            PRIORITY_RANGE.start(),
            PRIORITY_RANGE.end()
        )));
    }

    Ok(())
}
