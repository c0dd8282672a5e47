use chrono::Utc;
use entity::roster_user::{Role, UserStatus};
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, IntoActiveModel};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn user(&self) -> UserFixtures<'_> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert an active user without department assignments.
    pub async fn insert_user(
        &self,
        auth_id: &str,
        role: Role,
    ) -> Result<entity::roster_user::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::RosterUser::insert(entity::roster_user::ActiveModel {
                auth_id: ActiveValue::Set(auth_id.to_string()),
                username: ActiveValue::Set(format!("user_{}", auth_id)),
                email: ActiveValue::Set(format!("{}@example.com", auth_id)),
                role: ActiveValue::Set(role),
                status: ActiveValue::Set(UserStatus::Active),
                primary_department_id: ActiveValue::Set(None),
                secondary_department_id: ActiveValue::Set(None),
                division: ActiveValue::Set(None),
                rank: ActiveValue::Set(None),
                warnings: ActiveValue::Set(0),
                monthly_warnings: ActiveValue::Set(0),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a member, optionally assigned to a primary department.
    pub async fn insert_member(
        &self,
        auth_id: &str,
        primary_department_id: Option<i32>,
    ) -> Result<entity::roster_user::Model, TestError> {
        let user = self.insert_user(auth_id, Role::Member).await?;

        let mut user_am = user.into_active_model();
        user_am.primary_department_id = ActiveValue::Set(primary_department_id);

        Ok(user_am.update(&self.setup.db).await?)
    }

    /// Overwrite a user's status, e.g. to put them on leave.
    pub async fn set_status(
        &self,
        user: entity::roster_user::Model,
        status: UserStatus,
    ) -> Result<entity::roster_user::Model, TestError> {
        let mut user_am = user.into_active_model();
        user_am.status = ActiveValue::Set(status);

        Ok(user_am.update(&self.setup.db).await?)
    }

    /// Overwrite a user's secondary department.
    pub async fn set_secondary_department(
        &self,
        user: entity::roster_user::Model,
        department_id: Option<i32>,
    ) -> Result<entity::roster_user::Model, TestError> {
        let mut user_am = user.into_active_model();
        user_am.secondary_department_id = ActiveValue::Set(department_id);

        Ok(user_am.update(&self.setup.db).await?)
    }

    /// Reload a user from the database.
    pub async fn reload(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::roster_user::Model>, TestError> {
        Ok(entity::prelude::RosterUser::find_by_id(user_id)
            .one(&self.setup.db)
            .await?)
    }
}
