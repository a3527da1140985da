//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
///
/// Used as the default `uploaded_on` for sounds created without one.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
