//! Diesel table definitions for the student registry.

diesel::table! {
    student (id) {
        id -> Int8,
        name -> Varchar,
        passport_number -> Varchar,
    }
}
