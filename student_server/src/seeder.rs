//! Demo data for a fresh registry.

use crate::models::student::Student;
use crate::repository::StudentRepository;

/// Students inserted into an empty store.
pub const DEMO_STUDENTS: [(&str, &str); 2] = [("Bob", "A1234567"), ("Alice", "B1234568")];

/// Seed demo students through the repository contract.
///
/// Idempotent: does nothing when the store already holds records. Returns
/// the number of students inserted.
pub async fn seed_students(repo: &dyn StudentRepository) -> anyhow::Result<usize> {
    if !repo.find_all().await?.is_empty() {
        tracing::info!("Student store already populated, skipping seed");
        return Ok(0);
    }

    for (name, passport_number) in DEMO_STUDENTS {
        let saved = repo.save(Student::new(name, passport_number)).await?;
        tracing::debug!(student_id = ?saved.id, "Seeded student");
    }

    crate::metrics::seeded_records(DEMO_STUDENTS.len());
    tracing::info!("Seeded {} demo students", DEMO_STUDENTS.len());
    Ok(DEMO_STUDENTS.len())
}
