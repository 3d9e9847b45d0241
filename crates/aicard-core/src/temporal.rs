//! # Temporal Types — RFC 3339 Timestamps, Compared in UTC
//!
//! Defines `Timestamp`, the parse target for `createdAt`/`updatedAt` card
//! fields and catalog entry freshness markers.
//!
//! Cards arrive from the wild, so the parser accepts any RFC 3339 offset and
//! normalizes to UTC for comparison. The string in the document is never
//! rewritten — signatures cover the raw bytes, so normalization here affects
//! only ordering checks, never signed content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A UTC instant parsed from an RFC 3339 string.
///
/// Ordering (`<`, `>=`) compares instants, so `2024-01-01T05:00:00+05:00`
/// and `2024-01-01T00:00:00Z` are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse an RFC 3339 timestamp, converting any offset to UTC.
    ///
    /// # Errors
    ///
    /// Returns the underlying chrono parse error message if the string is
    /// not valid RFC 3339. Callers report this as a validation issue rather
    /// than propagating it as a hard failure.
    pub fn parse(s: &str) -> Result<Self, String> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| format!("invalid RFC 3339 timestamp {s:?}: {e}"))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO 8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}
