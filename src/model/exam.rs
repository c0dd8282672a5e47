use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored exam question including its answer key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExamQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_option: usize,
}

/// Exam question as shown to examinees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublicQuestionDto {
    pub prompt: String,
    pub options: Vec<String>,
}

impl From<ExamQuestion> for PublicQuestionDto {
    fn from(question: ExamQuestion) -> Self {
        Self {
            prompt: question.prompt,
            options: question.options,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExamDto {
    pub id: i32,
    pub title: String,
    pub department_id: Option<i32>,
    pub question_count: usize,
    pub pass_score: i32,
    pub time_limit_minutes: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateExamDto {
    pub title: String,
    pub department_id: Option<i32>,
    pub questions: Vec<ExamQuestion>,
    pub pass_score: i32,
    pub time_limit_minutes: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct StartSessionDto {
    /// Application in `test_required` this attempt counts towards
    pub application_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExamSessionDto {
    pub id: i32,
    pub exam_id: i32,
    pub application_id: Option<i32>,
    pub started_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
    pub questions: Vec<PublicQuestionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitAnswersDto {
    /// Chosen option index per question, in question order
    pub answers: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExamResultDto {
    pub id: i32,
    pub session_id: i32,
    pub exam_id: i32,
    pub score: i32,
    pub passed: bool,
    pub created_at: NaiveDateTime,
}

impl From<entity::exam_result::Model> for ExamResultDto {
    fn from(result: entity::exam_result::Model) -> Self {
        Self {
            id: result.id,
            session_id: result.session_id,
            exam_id: result.exam_id,
            score: result.score,
            passed: result.passed,
            created_at: result.created_at,
        }
    }
}
