//! Application submission and review.

pub mod eligibility;
pub mod workflow;

use chrono::Utc;
use entity::{
    application::{ApplicationKind, ApplicationStatus},
    roster_user::Role,
};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::application::ApplicationData,
    server::{
        data::{application::ApplicationRepository, department::DepartmentRepository},
        error::{application::ApplicationError, Error},
        model::db::{ApplicationModel, UserModel},
        service::retry::RetryContext,
    },
};

use self::eligibility::{can_submit_application, check_kind, Eligibility};

#[cfg(test)]
mod tests;

pub struct ApplicationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationService<'a> {
    /// Creates a new instance of [`ApplicationService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and stores a new pending application.
    ///
    /// # Returns
    /// - `Ok(ApplicationModel)`: the stored application
    /// - `Err(Error::Validation)`: free-text fields empty or a referenced department missing
    /// - `Err(Error::ApplicationError(Denied))`: a quota, cooldown, overlap or role rule applies
    pub async fn submit(
        &self,
        user: &UserModel,
        data: ApplicationData,
    ) -> Result<ApplicationModel, Error> {
        validate_text(&data)?;

        if let Some(department_id) = referenced_department(&data) {
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

        let history = self.history(user.id).await?;
        if let Eligibility::Denied { reason } =
            can_submit_application(&data, user, &history, Utc::now().naive_utc())
        {
            return Err(ApplicationError::Denied(reason).into());
        }

        let application = ApplicationRepository::new(self.db)
            .create(user.id, data.kind(), serde_json::to_value(&data)?)
            .await?;

        tracing::info!(
            application_id = application.id,
            author_id = user.id,
            kind = %workflow::label(&application.kind),
            "Application submitted"
        );

        Ok(application)
    }

    /// Kind-level rules only, used before the user has filled in a payload
    pub async fn eligibility(
        &self,
        user: &UserModel,
        kind: ApplicationKind,
    ) -> Result<Eligibility, Error> {
        let history = self.history(user.id).await?;

        Ok(check_kind(kind, user, &history, Utc::now().naive_utc()))
    }

    pub async fn list_own(&self, user_id: i32) -> Result<Vec<ApplicationModel>, Error> {
        self.history(user_id).await
    }

    /// Authors see their own applications, supervisors and above see all of them
    pub async fn get_visible(
        &self,
        user: &UserModel,
        application_id: i32,
    ) -> Result<ApplicationModel, Error> {
        let application = ApplicationRepository::new(self.db)
            .find_by_id(application_id)
            .await?
            .filter(|application| {
                application.author_id == user.id || user.role.at_least(Role::Supervisor)
            });

        application.ok_or_else(|| Error::not_found(format!("Application {}", application_id)))
    }

    pub async fn review_queue(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ApplicationModel>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("application review queue", move || async move {
                Ok(ApplicationRepository::new(db).list_by_status(status).await?)
            })
            .await
    }

    /// Moves an application through the review workflow in a single transaction
    pub async fn advance(
        &self,
        reviewer: &UserModel,
        application_id: i32,
        next: ApplicationStatus,
        comment: Option<String>,
    ) -> Result<ApplicationModel, Error> {
        let txn = self.db.begin().await?;

        let Some(application) = ApplicationRepository::new(&txn)
            .find_by_id(application_id)
            .await?
        else {
            return Err(Error::not_found(format!("Application {}", application_id)));
        };

        let updated = workflow::advance_application_status(
            &txn,
            application,
            next,
            Some(reviewer.id),
            comment,
        )
        .await?;

        txn.commit().await?;

        Ok(updated)
    }

    async fn history(&self, user_id: i32) -> Result<Vec<ApplicationModel>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("application history", move || async move {
                Ok(ApplicationRepository::new(db).find_by_author(user_id).await?)
            })
            .await
    }
}

fn referenced_department(data: &ApplicationData) -> Option<i32> {
    match data {
        ApplicationData::Entry { department_id, .. } => Some(*department_id),
        ApplicationData::TransferDept {
            target_department_id,
            ..
        } => Some(*target_department_id),
        ApplicationData::JointPrimary {
            secondary_department_id,
            ..
        }
        | ApplicationData::JointSecondary {
            secondary_department_id,
            ..
        } => Some(*secondary_department_id),
        _ => None,
    }
}

fn validate_text(data: &ApplicationData) -> Result<(), Error> {
    let fields: Vec<(&str, &str)> = match data {
        ApplicationData::Entry {
            character_name,
            motivation,
            ..
        } => vec![
            ("character_name", character_name.as_str()),
            ("motivation", motivation.as_str()),
        ],
        ApplicationData::Leave { reason, .. }
        | ApplicationData::TransferDept { reason, .. }
        | ApplicationData::JointPrimary { reason, .. }
        | ApplicationData::JointSecondary { reason, .. } => vec![("reason", reason.as_str())],
        ApplicationData::TransferDiv {
            target_division,
            reason,
        } => vec![
            ("target_division", target_division.as_str()),
            ("reason", reason.as_str()),
        ],
        ApplicationData::Promotion {
            target_rank,
            reason,
        } => vec![("target_rank", target_rank.as_str()), ("reason", reason.as_str())],
        ApplicationData::Qualification {
            qualification,
            reason,
        } => vec![
            ("qualification", qualification.as_str()),
            ("reason", reason.as_str()),
        ],
    };

    match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(Error::validation(format!("{} must not be empty", name))),
        None => Ok(()),
    }
}
