use sea_orm::DatabaseConnection;

use crate::{
    model::department::CreateDepartmentDto,
    server::{data::department::DepartmentRepository, error::Error, service::retry::RetryContext},
};

pub struct DepartmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DepartmentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<entity::department::Model>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("department list", move || async move {
                Ok(DepartmentRepository::new(db).list().await?)
            })
            .await
    }

    pub async fn get(&self, department_id: i32) -> Result<entity::department::Model, Error> {
        DepartmentRepository::new(self.db)
            .find_by_id(department_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Department {}", department_id)))
    }

    /// Creates a department, names are unique
    pub async fn create(
        &self,
        input: CreateDepartmentDto,
    ) -> Result<entity::department::Model, Error> {
        let name = input.name.trim();
        let short_name = input.short_name.trim();
        if name.is_empty() || short_name.is_empty() {
            return Err(Error::validation(
                "Department name and short name must not be empty",
            ));
        }

        let department_repo = DepartmentRepository::new(self.db);
        if department_repo.find_by_name(name).await?.is_some() {
            return Err(Error::conflict(format!(
                "Department {} already exists",
                name
            )));
        }

        let department = department_repo
            .create(name, short_name, input.description)
            .await?;

        tracing::info!(department_id = department.id, "Created department");

        Ok(department)
    }
}
