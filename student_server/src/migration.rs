//! Bootstrap DDL for the PostgreSQL backend.

use diesel_async::AsyncPgConnection;
use diesel_async::SimpleAsyncConnection;

/// SQL migration for the student registry.
///
/// Idempotent, safe to run on every startup. Column widths match the
/// validation bounds on [`crate::models::student::Student`].
pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS student (
    id              BIGSERIAL PRIMARY KEY,
    name            VARCHAR(100) NOT NULL,
    passport_number VARCHAR(100) NOT NULL UNIQUE
);
"#;

/// Run the student registry migration.
pub async fn run_migration(conn: &mut AsyncPgConnection) -> anyhow::Result<()> {
    conn.batch_execute(MIGRATION_SQL)
        .await
        .map_err(|e| anyhow::anyhow!("student migration failed: {e}"))?;
    Ok(())
}
