use chrono::Utc;
use entity::roster_user::{Role, UserStatus};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, ExprTrait, QueryFilter, QueryOrder,
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an active candidate for the given auth provider subject
    pub async fn create(
        &self,
        auth_id: &str,
        username: &str,
        email: &str,
    ) -> Result<entity::roster_user::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let user = entity::roster_user::ActiveModel {
            auth_id: ActiveValue::Set(auth_id.to_string()),
            username: ActiveValue::Set(username.to_string()),
            email: ActiveValue::Set(email.to_string()),
            role: ActiveValue::Set(Role::Candidate),
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
        };

        user.insert(self.db).await
    }

    pub async fn find_by_id(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::roster_user::Model>, DbErr> {
        entity::prelude::RosterUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_auth_id(
        &self,
        auth_id: &str,
    ) -> Result<Option<entity::roster_user::Model>, DbErr> {
        entity::prelude::RosterUser::find()
            .filter(entity::roster_user::Column::AuthId.eq(auth_id))
            .one(self.db)
            .await
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::roster_user::Model>, DbErr> {
        entity::prelude::RosterUser::find()
            .filter(entity::roster_user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::roster_user::Model>, DbErr> {
        entity::prelude::RosterUser::find()
            .order_by_asc(entity::roster_user::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find_by_status(
        &self,
        status: UserStatus,
    ) -> Result<Vec<entity::roster_user::Model>, DbErr> {
        entity::prelude::RosterUser::find()
            .filter(entity::roster_user::Column::Status.eq(status))
            .all(self.db)
            .await
    }

    /// Persists changed columns of a user, bumping `updated_at`
    pub async fn update(
        &self,
        mut user: entity::roster_user::ActiveModel,
    ) -> Result<entity::roster_user::Model, DbErr> {
        user.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        user.update(self.db).await
    }

    /// Increments both the lifetime and the monthly warning counters
    pub async fn add_warning(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::roster_user::Model>, DbErr> {
        entity::prelude::RosterUser::update_many()
            .col_expr(
                entity::roster_user::Column::Warnings,
                Expr::col(entity::roster_user::Column::Warnings).add(1),
            )
            .col_expr(
                entity::roster_user::Column::MonthlyWarnings,
                Expr::col(entity::roster_user::Column::MonthlyWarnings).add(1),
            )
            .col_expr(
                entity::roster_user::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::roster_user::Column::Id.eq(user_id))
            .exec(self.db)
            .await?;

        self.find_by_id(user_id).await
    }

    /// Zeroes every user's monthly warning counter, returning the number of users touched
    pub async fn reset_monthly_warnings(&self) -> Result<u64, DbErr> {
        let result = entity::prelude::RosterUser::update_many()
            .col_expr(entity::roster_user::Column::MonthlyWarnings, Expr::value(0))
            .filter(entity::roster_user::Column::MonthlyWarnings.ne(0))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
