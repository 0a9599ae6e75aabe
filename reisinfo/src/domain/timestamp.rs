//! NS timestamp parsing.
//!
//! The NS API sends timestamps like `2024-03-01T10:05:00+0100`, which is
//! RFC 3339 without the colon in the offset. Both spellings are accepted.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};

/// Format used by the NS API.
const NS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Parse an NS timestamp, falling back to RFC 3339.
pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_str(s, NS_FORMAT).or_else(|_| DateTime::parse_from_rfc3339(s))
}

/// Serde adapter for a required timestamp field.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Serde adapter for an optional (nullable or absent) timestamp field.
pub mod option {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_timestamp(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
