use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct DepartmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DepartmentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: &str,
        short_name: &str,
        description: Option<String>,
    ) -> Result<entity::department::Model, DbErr> {
        let department = entity::department::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            short_name: ActiveValue::Set(short_name.to_string()),
            description: ActiveValue::Set(description),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        department.insert(self.db).await
    }

    pub async fn find_by_id(
        &self,
        department_id: i32,
    ) -> Result<Option<entity::department::Model>, DbErr> {
        entity::prelude::Department::find_by_id(department_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<entity::department::Model>, DbErr> {
        entity::prelude::Department::find()
            .filter(entity::department::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::department::Model>, DbErr> {
        entity::prelude::Department::find()
            .order_by_asc(entity::department::Column::Name)
            .all(self.db)
            .await
    }
}
