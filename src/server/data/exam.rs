use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct ExamRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ExamRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        title: String,
        department_id: Option<i32>,
        questions: serde_json::Value,
        pass_score: i32,
        time_limit_minutes: i32,
    ) -> Result<entity::exam::Model, DbErr> {
        let exam = entity::exam::ActiveModel {
            title: ActiveValue::Set(title),
            department_id: ActiveValue::Set(department_id),
            questions: ActiveValue::Set(questions),
            pass_score: ActiveValue::Set(pass_score),
            time_limit_minutes: ActiveValue::Set(time_limit_minutes),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        exam.insert(self.db).await
    }

    pub async fn find_by_id(&self, exam_id: i32) -> Result<Option<entity::exam::Model>, DbErr> {
        entity::prelude::Exam::find_by_id(exam_id).one(self.db).await
    }

    pub async fn list(&self) -> Result<Vec<entity::exam::Model>, DbErr> {
        entity::prelude::Exam::find()
            .order_by_asc(entity::exam::Column::Title)
            .all(self.db)
            .await
    }

    pub async fn create_session(
        &self,
        exam_id: i32,
        user_id: i32,
        application_id: Option<i32>,
        started_at: NaiveDateTime,
        expires_at: NaiveDateTime,
    ) -> Result<entity::exam_session::Model, DbErr> {
        let session = entity::exam_session::ActiveModel {
            exam_id: ActiveValue::Set(exam_id),
            user_id: ActiveValue::Set(user_id),
            application_id: ActiveValue::Set(application_id),
            started_at: ActiveValue::Set(started_at),
            expires_at: ActiveValue::Set(expires_at),
            submitted_at: ActiveValue::Set(None),
            ..Default::default()
        };

        session.insert(self.db).await
    }

    pub async fn find_session(
        &self,
        session_id: i32,
    ) -> Result<Option<entity::exam_session::Model>, DbErr> {
        entity::prelude::ExamSession::find_by_id(session_id)
            .one(self.db)
            .await
    }

    pub async fn mark_session_submitted(
        &self,
        session: entity::exam_session::Model,
        submitted_at: NaiveDateTime,
    ) -> Result<entity::exam_session::Model, DbErr> {
        let mut session = session.into_active_model();
        session.submitted_at = ActiveValue::Set(Some(submitted_at));

        session.update(self.db).await
    }

    pub async fn create_result(
        &self,
        session: &entity::exam_session::Model,
        score: i32,
        passed: bool,
    ) -> Result<entity::exam_result::Model, DbErr> {
        let result = entity::exam_result::ActiveModel {
            session_id: ActiveValue::Set(session.id),
            exam_id: ActiveValue::Set(session.exam_id),
            user_id: ActiveValue::Set(session.user_id),
            score: ActiveValue::Set(score),
            passed: ActiveValue::Set(passed),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        result.insert(self.db).await
    }

    pub async fn list_results_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::exam_result::Model>, DbErr> {
        entity::prelude::ExamResult::find()
            .filter(entity::exam_result::Column::UserId.eq(user_id))
            .order_by_desc(entity::exam_result::Column::CreatedAt)
            .all(self.db)
            .await
    }
}
