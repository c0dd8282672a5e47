use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobStatusDto {
    pub job: String,
    pub cron: String,
    pub last_run_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobRunDto {
    pub job: String,
    /// Rows or users touched by the run
    pub affected: usize,
}
