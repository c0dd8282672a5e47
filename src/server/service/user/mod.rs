//! User registration and administration.

#[cfg(test)]
mod tests;

use entity::roster_user::Role;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{notification::NotificationRepository, user::UserRepository},
    error::{auth::AuthError, Error},
    model::{auth::Claims, db::UserModel},
    service::retry::RetryContext,
};

pub const WARNING_NOTIFICATION_KIND: &str = "warning";

const MAX_USERNAME_LENGTH: usize = 32;

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers the token subject as a new candidate.
    ///
    /// # Returns
    /// - `Ok(UserModel)`: the created user
    /// - `Err(Error::AuthError(AlreadyRegistered))`: the subject already has an account
    /// - `Err(Error::Conflict)`: the username is taken
    /// - `Err(Error::Validation)`: the username is blank or too long
    pub async fn register(&self, claims: &Claims, username: &str) -> Result<UserModel, Error> {
        let username = username.trim();
        if username.is_empty() || username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(Error::validation(format!(
                "Username must be between 1 and {} characters",
                MAX_USERNAME_LENGTH
            )));
        }

        let user_repo = UserRepository::new(self.db);

        if user_repo.find_by_auth_id(&claims.sub).await?.is_some() {
            return Err(AuthError::AlreadyRegistered.into());
        }
        if user_repo.find_by_username(username).await?.is_some() {
            return Err(Error::conflict(format!(
                "Username {} is already taken",
                username
            )));
        }

        let user = user_repo.create(&claims.sub, username, &claims.email).await?;

        tracing::info!(user_id = user.id, "Registered new user");

        Ok(user)
    }

    /// Looks up the user registered for an auth provider subject
    pub async fn get_by_auth_id(&self, auth_id: &str) -> Result<Option<UserModel>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("user lookup", move || async move {
                Ok(UserRepository::new(db).find_by_auth_id(auth_id).await?)
            })
            .await
    }

    pub async fn list(&self) -> Result<Vec<UserModel>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("user list", move || async move {
                Ok(UserRepository::new(db).list().await?)
            })
            .await
    }

    pub async fn update_role(&self, user_id: i32, role: Role) -> Result<UserModel, Error> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Err(Error::not_found(format!("User {}", user_id)));
        };

        let mut user_am: entity::roster_user::ActiveModel = user.into();
        user_am.role = sea_orm::ActiveValue::Set(role);
        let updated = user_repo.update(user_am).await?;

        tracing::info!(user_id, role = ?role, "Updated user role");

        Ok(updated)
    }

    /// Issues a warning, incrementing both counters and notifying the user
    pub async fn add_warning(&self, user_id: i32, reason: &str) -> Result<UserModel, Error> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(Error::validation("Warning reason must not be empty"));
        }

        let txn = self.db.begin().await?;

        let Some(user) = UserRepository::new(&txn).add_warning(user_id).await? else {
            return Err(Error::not_found(format!("User {}", user_id)));
        };

        NotificationRepository::new(&txn)
            .create(
                user.id,
                WARNING_NOTIFICATION_KIND,
                "You received a warning",
                reason,
            )
            .await?;

        txn.commit().await?;

        tracing::info!(
            user_id,
            warnings = user.warnings,
            monthly_warnings = user.monthly_warnings,
            "Issued warning"
        );

        Ok(user)
    }
}
