//! Persistence contract for student records, and its backends.
//!
//! The request handler only ever talks to [`StudentRepository`]; which
//! backend sits behind it is decided at startup.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::student::Student;

pub use memory::MemoryStudentRepository;
pub use postgres::PgStudentRepository;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Faults a repository can signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// A query expected data and found none.
    #[error("empty result")]
    EmptyResult,

    /// No record exists for the given id.
    #[error("no student with id {0}")]
    NotFound(i64),

    /// A write was rejected (constraint violation, aborted transaction).
    #[error("persistence fault: {0}")]
    Persistence(String),

    /// The backing store could not be reached.
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RepositoryError::EmptyResult => "empty_result",
            RepositoryError::NotFound(_) => "not_found",
            RepositoryError::Persistence(_) => "persistence",
            RepositoryError::Unavailable(_) => "unavailable",
        }
    }
}

/// CRUD primitives over student records.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students, in repository (insertion) order.
    async fn find_all(&self) -> RepositoryResult<Vec<Student>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Student>>;

    /// Insert when `student.id` is `None`, otherwise replace the record with
    /// that id. Returns the stored student with its id assigned.
    async fn save(&self, student: Student) -> RepositoryResult<Student>;

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()>;
}
