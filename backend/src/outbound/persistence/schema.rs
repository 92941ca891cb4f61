//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered users. `email` carries the `users_email_key` unique
    /// constraint; `session_id` is indexed for cookie lookups.
    users (id) {
        id -> Uuid,
        session_id -> Text,
        name -> Text,
        email -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Logged meals, cascaded away with their owner.
    meals (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Text,
        description -> Text,
        its_on_diet -> Bool,
        time -> Timestamptz,
    }
}

diesel::joinable!(meals -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(meals, users);
