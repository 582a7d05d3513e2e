//! Student registry — a REST service exposing CRUD over student records.
//!
//! The request handler validates input, delegates to a
//! [`repository::StudentRepository`] and maps outcomes to HTTP statuses.
//! Storage is either PostgreSQL (diesel-async) or an in-process map.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod migration;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod seeder;
