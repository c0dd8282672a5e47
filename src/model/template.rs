use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    /// Multi-line text
    Textarea,
    Number,
    /// `YYYY-MM-DD`
    Date,
    /// One of the field's `options`
    Select,
    Checkbox,
}

/// A single field of a report template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemplateField {
    /// Key the value is stored under in a filled report
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateDto {
    pub id: i32,
    pub department_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<TemplateField>,
    pub active: bool,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTemplateDto {
    pub name: String,
    pub description: Option<String>,
    pub department_id: Option<i32>,
    pub fields: Vec<TemplateField>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitFilledReportDto {
    #[schema(value_type = Object)]
    pub values: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FilledReportDto {
    pub id: i32,
    pub template_id: i32,
    pub author_id: i32,
    #[schema(value_type = Object)]
    pub values: serde_json::Value,
    pub created_at: NaiveDateTime,
}

impl From<entity::filled_report::Model> for FilledReportDto {
    fn from(report: entity::filled_report::Model) -> Self {
        Self {
            id: report.id,
            template_id: report.template_id,
            author_id: report.author_id,
            values: report.values,
            created_at: report.created_at,
        }
    }
}
