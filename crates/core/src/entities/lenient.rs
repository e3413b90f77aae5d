//! Null-tolerant field decoding for backend records.
//!
//! The backend drops fields, sends `null` for missing relations (a comment
//! whose author was deleted), and stores timestamps either as ISO strings or
//! as epoch milliseconds. One bad field must not fail a whole list.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Decode a field, treating an explicit `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Timestamp {
    Millis(i64),
    Text(DateTime<Utc>),
}

/// Decode an optional timestamp sent as RFC 3339 text or epoch milliseconds.
pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Timestamp>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Timestamp::Text(at)) => Ok(Some(at)),
        Some(Timestamp::Millis(ms)) => DateTime::from_timestamp_millis(ms)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
    }
}
