//! Diesel schema for task persistence.

/// DDL creating the task table when it does not already exist.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-18-000000_create_tasks/up.sql");

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Trimmed, non-empty title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
