//! Student registry data models.

pub mod student;
