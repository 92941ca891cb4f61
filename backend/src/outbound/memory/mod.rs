//! In-process repositories backed by mutex-guarded collections.
//!
//! Used when no database URL is configured and by HTTP tests. They honour
//! the same contracts as the Diesel adapters: email uniqueness, owner
//! scoping and `(time, id)` ordering.

mod meals;
mod users;

pub use meals::InMemoryMealRepository;
pub use users::InMemoryUserRepository;

use std::sync::{Mutex, MutexGuard};

/// Lock `mutex`, turning poisoning into the caller's query error.
fn lock<'a, T, E>(
    mutex: &'a Mutex<T>,
    query: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    mutex
        .lock()
        .map_err(|_| query("in-memory store lock poisoned".to_owned()))
}
