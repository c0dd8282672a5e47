//! Declarative test builder.
//!
//! The builder queues table creation and fixtures, all of which are executed by the final
//! `build()` call.

use entity::roster_user::Role;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_user_tables: bool,
    include_application_tables: bool,

    departments: Vec<String>,
    users: Vec<(String, Role)>, // (auth_id, role)
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Create a new builder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_user_tables: false,
            include_application_tables: false,
            departments: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Add the tables every authenticated request touches.
    ///
    /// Creates RosterUser, Department, Character and Notification.
    pub fn with_user_tables(mut self) -> Self {
        self.include_user_tables = true;
        self
    }

    /// Add the user tables plus Application.
    pub fn with_application_tables(mut self) -> Self {
        self.include_user_tables = true;
        self.include_application_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// ```no_run
    /// use roster_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), roster_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_user_tables()
    ///     .with_table(ForumCategory)
    ///     .with_table(ForumTopic)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a department with the given name during `build()`.
    pub fn with_department(mut self, name: &str) -> Self {
        self.departments.push(name.to_string());
        self
    }

    /// Insert a user with the given auth provider ID and role during `build()`.
    pub fn with_user(mut self, auth_id: &str, role: Role) -> Self {
        self.users.push((auth_id.to_string(), role));
        self
    }

    /// Build the test context: create tables, then insert fixtures.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_user_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::RosterUser),
                schema.create_table_from_entity(entity::prelude::Department),
                schema.create_table_from_entity(entity::prelude::Character),
                schema.create_table_from_entity(entity::prelude::Notification),
            ]);
        }

        if self.include_application_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.push(schema.create_table_from_entity(entity::prelude::Application));
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for name in self.departments {
            setup.department().insert_department(&name).await?;
        }

        for (auth_id, role) in self.users {
            setup.user().insert_user(&auth_id, role).await?;
        }

        Ok(setup)
    }
}
