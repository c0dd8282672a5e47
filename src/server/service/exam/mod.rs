//! Timed multiple-choice exams.
//!
//! A session can be linked to the user's application in `test_required`; submitting the
//! session then moves that application to `resolved` or `test_failed` as the system actor.

#[cfg(test)]
mod tests;

use chrono::{Duration, Utc};
use entity::application::ApplicationStatus;
use sea_orm::{DatabaseConnection, SqlErr, TransactionTrait};

use crate::{
    model::exam::{CreateExamDto, ExamDto, ExamQuestion, ExamSessionDto},
    server::{
        data::{application::ApplicationRepository, exam::ExamRepository},
        error::Error,
        model::db::ExamSessionModel,
        service::{application::workflow, retry::RetryContext},
    },
};

/// Score in percent and whether it reaches `pass_score`
pub fn grade(questions: &[ExamQuestion], answers: &[usize], pass_score: i32) -> (i32, bool) {
    if questions.is_empty() {
        return (0, false);
    }

    let correct = questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.correct_option == **answer)
        .count();
    let score = (correct * 100 / questions.len()) as i32;

    (score, score >= pass_score)
}

pub struct ExamService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ExamService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateExamDto) -> Result<ExamDto, Error> {
        validate_exam(&input)?;

        let exam = ExamRepository::new(self.db)
            .create(
                input.title,
                input.department_id,
                serde_json::to_value(&input.questions)?,
                input.pass_score,
                input.time_limit_minutes,
            )
            .await?;

        tracing::info!(exam_id = exam.id, "Created exam");

        to_dto(exam)
    }

    pub async fn list(&self) -> Result<Vec<ExamDto>, Error> {
        let db = self.db;

        let exams = RetryContext::new()
            .execute_with_retry("exam list", move || async move {
                Ok(ExamRepository::new(db).list().await?)
            })
            .await?;

        exams.into_iter().map(to_dto).collect()
    }

    /// Opens a timed attempt and returns the questions without their answer keys.
    ///
    /// # Returns
    /// - `Err(Error::NotFound)`: the exam, or a linked application of this user, doesn't exist
    /// - `Err(Error::Validation)`: the linked application is not waiting for a test
    pub async fn start_session(
        &self,
        user_id: i32,
        exam_id: i32,
        application_id: Option<i32>,
    ) -> Result<ExamSessionDto, Error> {
        let exam_repo = ExamRepository::new(self.db);

        let Some(exam) = exam_repo.find_by_id(exam_id).await? else {
            return Err(Error::not_found(format!("Exam {}", exam_id)));
        };

        if let Some(application_id) = application_id {
            let application = ApplicationRepository::new(self.db)
                .find_by_id(application_id)
                .await?
                .filter(|application| application.author_id == user_id)
                .ok_or_else(|| Error::not_found(format!("Application {}", application_id)))?;

            if application.status != ApplicationStatus::TestRequired {
                return Err(Error::validation(format!(
                    "Application {} is not waiting for a test",
                    application_id
                )));
            }
        }

        let questions: Vec<ExamQuestion> = serde_json::from_value(exam.questions)?;
        let started_at = Utc::now().naive_utc();
        let expires_at = started_at + Duration::minutes(exam.time_limit_minutes as i64);

        let session = exam_repo
            .create_session(exam.id, user_id, application_id, started_at, expires_at)
            .await?;

        tracing::debug!(session_id = session.id, exam_id, user_id, "Exam session started");

        Ok(ExamSessionDto {
            id: session.id,
            exam_id: session.exam_id,
            application_id: session.application_id,
            started_at: session.started_at,
            expires_at: session.expires_at,
            questions: questions.into_iter().map(Into::into).collect(),
        })
    }

    /// Grades a session once, in a single transaction with the linked application update.
    ///
    /// # Returns
    /// - `Err(Error::NotFound)`: no such session for this user
    /// - `Err(Error::Conflict)`: the session was already submitted, including by a concurrent
    ///   submit that stored its result first
    /// - `Err(Error::Validation)`: the time limit passed or the answer count is wrong
    pub async fn submit(
        &self,
        user_id: i32,
        session_id: i32,
        answers: Vec<usize>,
    ) -> Result<entity::exam_result::Model, Error> {
        let txn = self.db.begin().await?;
        let exam_repo = ExamRepository::new(&txn);

        let session = exam_repo
            .find_session(session_id)
            .await?
            .filter(|session| session.user_id == user_id)
            .ok_or_else(|| Error::not_found(format!("Exam session {}", session_id)))?;

        let now = Utc::now().naive_utc();
        check_open(&session, now)?;

        let Some(exam) = exam_repo.find_by_id(session.exam_id).await? else {
            return Err(Error::not_found(format!("Exam {}", session.exam_id)));
        };
        let questions: Vec<ExamQuestion> = serde_json::from_value(exam.questions)?;
        if answers.len() != questions.len() {
            return Err(Error::validation(format!(
                "Expected {} answers, got {}",
                questions.len(),
                answers.len()
            )));
        }

        let (score, passed) = grade(&questions, &answers, exam.pass_score);

        let session = exam_repo.mark_session_submitted(session, now).await?;
        let result = exam_repo
            .create_result(&session, score, passed)
            .await
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => already_submitted(session.id),
                _ => Error::from(err),
            })?;

        if let Some(application_id) = session.application_id {
            if let Some(application) = ApplicationRepository::new(&txn)
                .find_by_id(application_id)
                .await?
                .filter(|application| application.status == ApplicationStatus::TestRequired)
            {
                let next = if passed {
                    ApplicationStatus::Resolved
                } else {
                    ApplicationStatus::TestFailed
                };

                workflow::advance_application_status(
                    &txn,
                    application,
                    next,
                    None,
                    Some(format!("Exam \"{}\" scored {}%", exam.title, score)),
                )
                .await?;
            }
        }

        txn.commit().await?;

        tracing::info!(session_id, user_id, score, passed, "Exam graded");

        Ok(result)
    }

    pub async fn list_results(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::exam_result::Model>, Error> {
        let db = self.db;

        RetryContext::new()
            .execute_with_retry("exam result list", move || async move {
                Ok(ExamRepository::new(db).list_results_by_user(user_id).await?)
            })
            .await
    }
}

fn already_submitted(session_id: i32) -> Error {
    Error::conflict(format!("Exam session {} was already submitted", session_id))
}

fn check_open(session: &ExamSessionModel, now: chrono::NaiveDateTime) -> Result<(), Error> {
    if session.submitted_at.is_some() {
        return Err(already_submitted(session.id));
    }
    if now > session.expires_at {
        return Err(Error::validation(format!(
            "Exam session {} expired at {}",
            session.id,
            session.expires_at.format("%Y-%m-%d %H:%M")
        )));
    }

    Ok(())
}

fn validate_exam(input: &CreateExamDto) -> Result<(), Error> {
    if input.title.trim().is_empty() {
        return Err(Error::validation("Exam title must not be empty"));
    }
    if input.questions.is_empty() {
        return Err(Error::validation("An exam needs at least one question"));
    }
    if !(0..=100).contains(&input.pass_score) {
        return Err(Error::validation("Pass score must be between 0 and 100"));
    }
    if input.time_limit_minutes <= 0 {
        return Err(Error::validation("Time limit must be positive"));
    }

    for (index, question) in input.questions.iter().enumerate() {
        if question.options.len() < 2 {
            return Err(Error::validation(format!(
                "Question {} needs at least two options",
                index + 1
            )));
        }
        if question.correct_option >= question.options.len() {
            return Err(Error::validation(format!(
                "Question {} has no option {}",
                index + 1,
                question.correct_option
            )));
        }
    }

    Ok(())
}

fn to_dto(exam: entity::exam::Model) -> Result<ExamDto, Error> {
    let questions: Vec<ExamQuestion> = serde_json::from_value(exam.questions)?;

    Ok(ExamDto {
        id: exam.id,
        title: exam.title,
        department_id: exam.department_id,
        question_count: questions.len(),
        pass_score: exam.pass_score,
        time_limit_minutes: exam.time_limit_minutes,
        created_at: exam.created_at,
    })
}
