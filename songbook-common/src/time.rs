//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Timestamp for a mutation of a record created at `created_at`
///
/// Never earlier than `created_at`, so `updated_at >= created_at` holds even
/// if the wall clock stepped backwards since creation.
pub fn touch(created_at: DateTime<Utc>) -> DateTime<Utc> {
    now().max(created_at)
}
