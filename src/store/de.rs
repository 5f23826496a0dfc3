//! Lenient field decoders for documents written by the marketplace backend.
//!
//! Numbers may arrive as int32, int64 or double depending on how
//! the writer stored them, and timestamps as BSON dates or RFC 3339 strings.

use chrono::{DateTime, Utc};
use mongodb::bson::Bson;
use serde::{de::Error, Deserialize, Deserializer};

pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Bson::deserialize(deserializer)?;
    as_f64(&value).ok_or_else(|| D::Error::custom(format!("expected a number, found {value}")))
}

pub fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Bson::deserialize(deserializer)?;
    match value {
        Bson::Int32(n) => Ok(n.into()),
        Bson::Int64(n) => Ok(n),
        other => as_f64(&other)
            .map(|n| n.trunc() as i64)
            .ok_or_else(|| D::Error::custom(format!("expected a whole number, found {other}"))),
    }
}

pub fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Bson::deserialize(deserializer)? {
        Bson::Null | Bson::Undefined => None,
        Bson::String(s) if s.trim().is_empty() => None,
        Bson::String(s) => Some(s),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        Bson::Double(n) if n.fract() == 0.0 => Some(format!("{n:.0}")),
        other => Some(other.to_string()),
    })
}

pub fn timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    match Bson::deserialize(deserializer)? {
        Bson::Null | Bson::Undefined => Ok(None),
        Bson::DateTime(dt) => DateTime::from_timestamp_millis(dt.timestamp_millis())
            .map(Some)
            .ok_or_else(|| D::Error::custom("timestamp out of range")),
        Bson::String(s) => DateTime::parse_from_rfc3339(&s)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected a date, found {other}"))),
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}
