//! PostgreSQL student store (diesel-async over a deadpool pool).

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::upsert::excluded;
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use super::{RepositoryError, RepositoryResult, StudentRepository};
use crate::models::student::{NewStudent, Student, StudentRecord};
use crate::schema::student;

pub type PgPool = Pool<AsyncPgConnection>;

/// Build a connection pool. Connections are opened lazily on first use.
pub fn build_pool(database_url: &str, max_connections: usize) -> anyhow::Result<PgPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    Pool::builder(manager)
        .max_size(max_connections)
        .build()
        .map_err(|e| anyhow::anyhow!("diesel pool: {e}"))
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::EmptyResult,
            // Only constraint violations are the client's doing.
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => RepositoryError::Persistence(info.message().to_string()),
            DieselError::DatabaseError(_, info) => {
                RepositoryError::Unavailable(info.message().to_string())
            }
            other => RepositoryError::Unavailable(other.to_string()),
        }
    }
}

/// Student repository backed by the `student` table.
#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> RepositoryResult<Object<AsyncPgConnection>> {
        self.pool
            .get()
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Student>> {
        let mut conn = self.conn().await?;
        load_students(&mut conn).await
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Student>> {
        let mut conn = self.conn().await?;
        find_student(&mut conn, id).await
    }

    async fn save(&self, student: Student) -> RepositoryResult<Student> {
        let mut conn = self.conn().await?;
        upsert_student(&mut conn, NewStudent::from(student)).await
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        let mut conn = self.conn().await?;
        delete_student(&mut conn, id).await
    }
}

/// All students ordered by id.
async fn load_students(conn: &mut AsyncPgConnection) -> RepositoryResult<Vec<Student>> {
    let rows = student::table
        .order(student::id.asc())
        .select(StudentRecord::as_select())
        .load::<StudentRecord>(conn)
        .await?;
    Ok(rows.into_iter().map(Student::from).collect())
}

async fn find_student(conn: &mut AsyncPgConnection, id: i64) -> RepositoryResult<Option<Student>> {
    let row = student::table
        .find(id)
        .select(StudentRecord::as_select())
        .first::<StudentRecord>(conn)
        .await
        .optional()?;
    Ok(row.map(Student::from))
}

/// Insert, or overwrite name and passport number when the id already exists.
async fn upsert_student(
    conn: &mut AsyncPgConnection,
    new_student: NewStudent,
) -> RepositoryResult<Student> {
    let row = diesel::insert_into(student::table)
        .values(&new_student)
        .on_conflict(student::id)
        .do_update()
        .set((
            student::name.eq(excluded(student::name)),
            student::passport_number.eq(excluded(student::passport_number)),
        ))
        .returning(StudentRecord::as_returning())
        .get_result::<StudentRecord>(conn)
        .await?;
    Ok(Student::from(row))
}

async fn delete_student(conn: &mut AsyncPgConnection, id: i64) -> RepositoryResult<()> {
    let deleted = diesel::delete(student::table.find(id))
        .execute(conn)
        .await?;
    if deleted == 0 {
        return Err(RepositoryError::NotFound(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::error::ApiError;

    fn db_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_string()))
    }

    #[test]
    fn missing_row_is_empty_result() {
        assert_eq!(
            RepositoryError::from(DieselError::NotFound),
            RepositoryError::EmptyResult
        );
    }

    #[test]
    fn constraint_violations_are_persistence_faults() {
        for kind in [
            DatabaseErrorKind::UniqueViolation,
            DatabaseErrorKind::ForeignKeyViolation,
            DatabaseErrorKind::NotNullViolation,
            DatabaseErrorKind::CheckViolation,
        ] {
            let err = RepositoryError::from(db_error(kind, "violates constraint"));
            assert_eq!(
                err,
                RepositoryError::Persistence("violates constraint".to_string())
            );
        }
    }

    #[test]
    fn transport_failures_are_unavailable() {
        for (kind, message) in [
            (DatabaseErrorKind::ClosedConnection, "server closed the connection"),
            (DatabaseErrorKind::UnableToSendCommand, "could not send data to server"),
            (DatabaseErrorKind::SerializationFailure, "could not serialize access"),
            (DatabaseErrorKind::Unknown, "something went wrong"),
        ] {
            let err = RepositoryError::from(db_error(kind, message));
            assert_eq!(err, RepositoryError::Unavailable(message.to_string()));
        }
    }

    #[test]
    fn non_database_errors_are_unavailable() {
        let err = RepositoryError::from(DieselError::DeserializationError(
            "unexpected null in column name".into(),
        ));
        assert!(matches!(err, RepositoryError::Unavailable(_)));

        let err = RepositoryError::from(DieselError::RollbackTransaction);
        assert!(matches!(err, RepositoryError::Unavailable(_)));
    }

    #[test]
    fn read_path_transport_failure_is_server_error() {
        let err = RepositoryError::from(db_error(
            DatabaseErrorKind::UnableToSendCommand,
            "could not send data to server",
        ));
        assert_eq!(
            ApiError::from(err).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
