use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn department(&self) -> DepartmentFixtures<'_> {
        DepartmentFixtures { setup: self }
    }
}

pub struct DepartmentFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> DepartmentFixtures<'a> {
    pub async fn insert_department(
        &self,
        name: &str,
    ) -> Result<entity::department::Model, TestError> {
        let short_name: String = name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect::<String>()
            .to_uppercase();

        Ok(
            entity::prelude::Department::insert(entity::department::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                short_name: ActiveValue::Set(short_name),
                description: ActiveValue::Set(None),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
