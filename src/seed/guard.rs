//! Population marker check.
//!
//! Population is skipped for good once any demo-flagged user exists.
//! This is idempotence by marker, not per entity.

use crate::db::{DatabaseError, Store};

/// `true` when no demo-flagged user exists yet. Read-only; storage errors
/// are returned unchanged and never retried.
pub fn should_populate<S: Store + ?Sized>(store: &S) -> Result<bool, DatabaseError> {
    match store.first_demo_user()? {
        Some(user) => {
            tracing::info!(user_id = %user.id, "Demo data already exists, skipping seed");
            Ok(false)
        }
        None => Ok(true),
    }
}
