//! Shared test helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use taskboard::task::adapters::postgres::{PostgresTaskRepository, TaskPgPool};

/// Boxed error type for fallible test helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Variable holding the connection string of a disposable database.
pub const TEST_DATABASE_URL_ENV: &str = "TASKBOARD_TEST_DATABASE_URL";

static SCHEMA_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Points every pooled connection at the test schema.
#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, r2d2::Error> for SearchPath {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), r2d2::Error> {
        connection
            .batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(r2d2::Error::QueryError)
    }
}

/// A schema that is dropped, with its contents, when this value drops.
pub struct IsolatedSchema {
    url: String,
    name: String,
}

impl IsolatedSchema {
    fn create(url: &str) -> Result<Self, BoxError> {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
        let counter = SCHEMA_COUNTER.fetch_add(1, Ordering::Relaxed);
        let name = format!("taskboard_test_{}_{nanos}_{counter}", std::process::id());

        let mut connection = PgConnection::establish(url)?;
        connection.batch_execute(&format!("CREATE SCHEMA {name}"))?;
        Ok(Self {
            url: url.to_owned(),
            name,
        })
    }

    fn pool(&self) -> Result<TaskPgPool, BoxError> {
        let manager = ConnectionManager::<PgConnection>::new(&self.url);
        Ok(Pool::builder()
            .max_size(2)
            .connection_customizer(Box::new(SearchPath(self.name.clone())))
            .build(manager)?)
    }
}

impl Drop for IsolatedSchema {
    fn drop(&mut self) {
        if let Ok(mut connection) = PgConnection::establish(&self.url) {
            let _ignored = connection
                .batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.name))
                .is_ok();
        }
    }
}

/// Repository bound to its own schema.
pub struct TestStore {
    /// Repository under test.
    pub repository: PostgresTaskRepository,
    /// Owning guard for the schema; keep alive for the test's duration.
    pub schema: IsolatedSchema,
}

impl TestStore {
    /// Builds a second repository over the same schema, sharing no pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built.
    pub fn reconnect(&self) -> Result<PostgresTaskRepository, BoxError> {
        Ok(PostgresTaskRepository::new(self.schema.pool()?))
    }
}

/// Connects to the test database and creates the tasks table in a fresh
/// schema.
///
/// Returns `Ok(None)` when [`TEST_DATABASE_URL_ENV`] is unset.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the DDL fails.
pub async fn connect() -> Result<Option<TestStore>, BoxError> {
    let Ok(url) = std::env::var(TEST_DATABASE_URL_ENV) else {
        return Ok(None);
    };
    let schema = tokio::task::spawn_blocking(move || IsolatedSchema::create(&url)).await??;
    let pool = schema.pool()?;
    let repository = PostgresTaskRepository::new(pool);
    repository.ensure_schema().await?;
    Ok(Some(TestStore { repository, schema }))
}
