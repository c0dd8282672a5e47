//! Builds an [`AppState`] over a test context's database

use roster::server::{
    model::{app::AppState, auth::AuthKeys},
    scheduler::config::ScheduleConfig,
};
use roster_test_utils::{prelude::TEST_JWT_SECRET, TestContext};

/// Extension trait for TestContext to create AppState with the test signing secret
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        AppState::new(
            self.db.clone(),
            AuthKeys::new(TEST_JWT_SECRET, None),
            ScheduleConfig::default(),
        )
    }
}
