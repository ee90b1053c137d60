//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Non-empty task title.
        title -> Text,
        /// Free-form description, empty when not provided.
        description -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp, unset until the first update.
        updated_at -> Nullable<Timestamptz>,
    }
}
