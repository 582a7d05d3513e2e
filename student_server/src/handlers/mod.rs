//! Request handling for the student API.
//!
//! Handlers validate input, call the repository and translate its faults
//! into [`crate::error::ApiError`]. HTTP encoding lives in [`crate::routes`].

pub mod student;

pub use student::StudentHandler;
