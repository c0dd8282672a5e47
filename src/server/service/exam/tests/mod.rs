mod session;

use entity::application::{ApplicationKind, ApplicationStatus};
use roster_test_utils::prelude::*;

use crate::{
    model::exam::{CreateExamDto, ExamQuestion},
    server::{
        error::Error,
        service::exam::{grade, ExamService},
    },
};

fn question(correct_option: usize) -> ExamQuestion {
    ExamQuestion {
        prompt: "Which code means officer needs assistance?".to_string(),
        options: vec!["10-4".to_string(), "10-99".to_string(), "10-20".to_string()],
        correct_option,
    }
}

fn exam_input(pass_score: i32) -> CreateExamDto {
    CreateExamDto {
        title: "Radio codes".to_string(),
        department_id: None,
        questions: vec![question(1), question(0)],
        pass_score,
        time_limit_minutes: 15,
    }
}

async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_application_tables()
        .with_table(entity::prelude::Exam)
        .with_table(entity::prelude::ExamSession)
        .with_table(entity::prelude::ExamResult)
        .build()
        .await
}
