use entity::prelude::*;
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityTrait, Schema,
};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Server, User};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Server)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements to execute during database setup, in insertion order.
    tables: Vec<TableCreateStatement>,

    /// CREATE INDEX statements executed after every table exists.
    ///
    /// Composite unique constraints cannot be derived from an entity definition, so they
    /// are declared here to mirror the migrations.
    indexes: Vec<IndexCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with empty table configuration
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after their referenced tables).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds an index to create once all tables exist.
    ///
    /// # Arguments
    /// - `index` - CREATE INDEX statement
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_index(mut self, index: IndexCreateStatement) -> Self {
        self.indexes.push(index);
        self
    }

    /// Adds every table used by the community backend.
    ///
    /// Adds, in dependency order:
    /// - User
    /// - Server
    /// - ServerMembership (with the unique `(user_id, server_id)` index)
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_community_tables(self) -> Self {
        self.with_table(User)
            .with_table(Server)
            .with_table(ServerMembership)
            .with_index(
                Index::create()
                    .name("idx_server_membership_user_server_unique")
                    .table(ServerMembership)
                    .col(entity::server_membership::Column::UserId)
                    .col(entity::server_membership::Column::ServerId)
                    .unique()
                    .to_owned(),
            )
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// Creates an in-memory SQLite database connection and executes all CREATE TABLE
    /// statements followed by all CREATE INDEX statements.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_indexes(self.indexes).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
