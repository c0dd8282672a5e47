//! Report templates authored by staff and reports filled in against them.

pub mod validation;

use sea_orm::DatabaseConnection;

use crate::{
    model::template::{CreateTemplateDto, TemplateDto, TemplateField},
    server::{
        data::template::{FilledReportRepository, TemplateRepository},
        error::Error,
        service::retry::RetryContext,
    },
};

use self::validation::{validate_fields, validate_values};

pub struct TemplateService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TemplateService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        created_by: i32,
        input: CreateTemplateDto,
    ) -> Result<TemplateDto, Error> {
        if input.name.trim().is_empty() {
            return Err(Error::validation("Template name must not be empty"));
        }
        validate_fields(&input.fields)?;

        let template = TemplateRepository::new(self.db)
            .create(
                created_by,
                input.name,
                input.description,
                input.department_id,
                serde_json::to_value(&input.fields)?,
            )
            .await?;

        tracing::info!(template_id = template.id, "Created report template");

        to_dto(template)
    }

    pub async fn list_active(&self) -> Result<Vec<TemplateDto>, Error> {
        let db = self.db;

        let templates = RetryContext::new()
            .execute_with_retry("template list", move || async move {
                Ok(TemplateRepository::new(db).list_active().await?)
            })
            .await?;

        templates.into_iter().map(to_dto).collect()
    }

    pub async fn get(&self, template_id: i32) -> Result<TemplateDto, Error> {
        let template = TemplateRepository::new(self.db)
            .find_by_id(template_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Template {}", template_id)))?;

        to_dto(template)
    }

    /// Validates `values` against the template's fields and stores the filled report
    pub async fn submit(
        &self,
        author_id: i32,
        template_id: i32,
        values: serde_json::Map<String, serde_json::Value>,
    ) -> Result<entity::filled_report::Model, Error> {
        let template = self.get(template_id).await?;
        if !template.active {
            return Err(Error::conflict(format!(
                "Template {} is no longer active",
                template_id
            )));
        }

        validate_values(&template.fields, &values)?;

        let report = FilledReportRepository::new(self.db)
            .create(template_id, author_id, serde_json::Value::Object(values))
            .await?;

        tracing::debug!(report_id = report.id, template_id, author_id, "Filled report submitted");

        Ok(report)
    }

    pub async fn list_reports(
        &self,
        template_id: i32,
    ) -> Result<Vec<entity::filled_report::Model>, Error> {
        self.get(template_id).await?;

        Ok(FilledReportRepository::new(self.db)
            .list_by_template(template_id)
            .await?)
    }

    pub async fn list_own_reports(
        &self,
        author_id: i32,
    ) -> Result<Vec<entity::filled_report::Model>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("filled report list", move || async move {
                Ok(FilledReportRepository::new(db)
                    .list_by_author(author_id)
                    .await?)
            })
            .await
    }
}

fn to_dto(template: entity::report_template::Model) -> Result<TemplateDto, Error> {
    let fields: Vec<TemplateField> = serde_json::from_value(template.fields)?;

    Ok(TemplateDto {
        id: template.id,
        department_id: template.department_id,
        name: template.name,
        description: template.description,
        fields,
        active: template.active,
        created_by: template.created_by,
        created_at: template.created_at,
    })
}
