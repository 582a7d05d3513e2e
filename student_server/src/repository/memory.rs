//! In-process student store, used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RepositoryError, RepositoryResult, StudentRepository};
use crate::models::student::Student;

#[derive(Debug)]
struct MemoryState {
    next_id: i64,
    // Keyed by id; ids only grow, so key order is insertion order.
    rows: BTreeMap<i64, Student>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl MemoryState {
    fn insert(&mut self, mut student: Student) -> RepositoryResult<Student> {
        let id = match student.id {
            Some(id) => id,
            None => self.next_id,
        };

        let duplicate = self
            .rows
            .values()
            .any(|s| s.passport_number == student.passport_number && s.id != Some(id));
        if duplicate {
            return Err(RepositoryError::Persistence(format!(
                "passport number {} already registered",
                student.passport_number
            )));
        }

        student.id = Some(id);
        self.next_id = self.next_id.max(id.saturating_add(1));
        self.rows.insert(id, student.clone());
        Ok(student)
    }
}

/// Student repository backed by an ordered map behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryStudentRepository {
    state: RwLock<MemoryState>,
}

impl MemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store. Students without an id get the next free one.
    pub fn with_students(students: impl IntoIterator<Item = Student>) -> RepositoryResult<Self> {
        let mut state = MemoryState::default();
        for student in students {
            state.insert(student)?;
        }
        Ok(Self {
            state: RwLock::new(state),
        })
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl StudentRepository for MemoryStudentRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Student>> {
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Student>> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn save(&self, student: Student) -> RepositoryResult<Student> {
        self.state.write().await.insert(student)
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        match self.state.write().await.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound(id)),
        }
    }
}
