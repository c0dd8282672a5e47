//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context holds an
//! in-memory SQLite database and the secret used to sign bearer tokens so tests can
//! exercise authenticated handlers.

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{constant::TEST_JWT_SECRET, error::TestError};

/// Test context structure returned by `TestBuilder`
///
/// ```ignore
/// let mut test = TestBuilder::new().with_user_tables().build().await?;
///
/// let user = test.user().insert_member("auth|1", None).await?;
/// let token = test.auth().token_for(&user.auth_id)?;
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Secret bearer tokens are signed with
    pub jwt_secret: String,
}

impl TestContext {
    /// Create a new test context with an empty in-memory database.
    pub(crate) async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            jwt_secret: TEST_JWT_SECRET.to_string(),
        })
    }

    /// Create database tables from schema statements.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }
}
