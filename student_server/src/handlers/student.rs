//! StudentHandler — one operation per verb/path of the student API.

use std::sync::Arc;

use garde::Validate;

use crate::error::{ApiError, ApiResult};
use crate::models::student::Student;
use crate::repository::{RepositoryError, StudentRepository};

/// Stateless request handler over a shared repository.
#[derive(Clone)]
pub struct StudentHandler {
    repo: Arc<dyn StudentRepository>,
}

impl StudentHandler {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { repo }
    }

    /// `GET /student`
    ///
    /// An empty store answers with an empty list; only an empty-result
    /// fault from the repository becomes a 404.
    pub async fn list(&self) -> ApiResult<Vec<Student>> {
        let students = self
            .repo
            .find_all()
            .await
            .map_err(|e| fault("list", e))?;
        tracing::debug!(count = students.len(), "Listed students");
        Ok(students)
    }

    /// `GET /student/{id}`
    pub async fn get(&self, id: i64) -> ApiResult<Student> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| fault("get", e))?
            .ok_or_else(|| {
                tracing::debug!(student_id = id, "Student not found");
                ApiError::NotFound
            })
    }

    /// `POST /student`
    pub async fn create(&self, student: Student) -> ApiResult<Student> {
        student.validate()?;

        let student = Student {
            id: None,
            ..student
        };
        let saved = self
            .repo
            .save(student)
            .await
            .map_err(|e| fault("create", e))?;

        tracing::info!(student_id = ?saved.id, "Student created");
        Ok(saved)
    }

    /// `PUT /student/{id}`
    ///
    /// `body` is the decoded request body, or the reason it could not be
    /// decoded. It is only looked at once the record is known to exist.
    pub async fn update(&self, id: i64, body: ApiResult<Student>) -> ApiResult<Student> {
        if self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| fault("update", e))?
            .is_none()
        {
            tracing::debug!(student_id = id, "Update target not found");
            return Err(ApiError::NotFound);
        }

        let student = body?.merged_into(id);
        student.validate()?;

        let saved = self
            .repo
            .save(student)
            .await
            .map_err(|e| fault("update", e))?;

        tracing::info!(student_id = id, "Student updated");
        Ok(saved)
    }

    /// `DELETE /student/{id}`
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.repo
            .delete_by_id(id)
            .await
            .map_err(|e| fault("delete", e))?;

        tracing::info!(student_id = id, "Student deleted");
        Ok(())
    }
}

/// Log and count a repository fault, then map it for the client.
fn fault(operation: &'static str, err: RepositoryError) -> ApiError {
    crate::metrics::repository_fault(err.kind());
    match &err {
        RepositoryError::Unavailable(msg) => {
            tracing::error!(operation, "Student repository unavailable: {msg}");
        }
        RepositoryError::Persistence(msg) => {
            tracing::warn!(operation, "Student write rejected: {msg}");
        }
        RepositoryError::EmptyResult | RepositoryError::NotFound(_) => {
            tracing::debug!(operation, "Student repository: {err}");
        }
    }
    ApiError::from(err)
}
