//! student — The sole entity of the registry.

use diesel::prelude::*;
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::schema::student;

/// Upper bound, in characters, for `name` and `passport_number`. Mirrored
/// by the `garde` attributes below and the column widths in the migration.
pub const MAX_FIELD_CHARS: usize = 100;

/// A student as exchanged over HTTP and through the repository contract.
///
/// `id` is absent until the repository assigns one on first save. Missing
/// text fields decode as empty strings so that they fail validation rather
/// than decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub id: Option<i64>,
    #[serde(default)]
    #[garde(length(chars, min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[garde(length(chars, min = 1, max = 100))]
    pub passport_number: String,
}

impl Student {
    /// An unsaved student.
    pub fn new(name: impl Into<String>, passport_number: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            passport_number: passport_number.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Bind this body's fields to the path identifier, dropping any id the
    /// body carried.
    pub fn merged_into(self, id: i64) -> Self {
        Self {
            id: Some(id),
            name: self.name,
            passport_number: self.passport_number,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = student)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub passport_number: String,
}

/// Row written by `save`. A `None` id leaves the column to its sequence default.
#[derive(Debug, Insertable)]
#[diesel(table_name = student)]
pub struct NewStudent {
    pub id: Option<i64>,
    pub name: String,
    pub passport_number: String,
}

impl From<StudentRecord> for Student {
    fn from(record: StudentRecord) -> Self {
        Self {
            id: Some(record.id),
            name: record.name,
            passport_number: record.passport_number,
        }
    }
}

impl From<Student> for NewStudent {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            passport_number: student.passport_number,
        }
    }
}
