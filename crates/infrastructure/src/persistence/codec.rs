//! Row decoding helpers shared by the per-entity record mappings

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use uuid::Uuid;

/// Build a column conversion failure for hand-rolled decoders
pub(crate) fn decode_err(idx: usize, msg: impl Into<String>) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, msg.into().into())
}

pub(crate) fn parse_uuid(idx: usize, s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| decode_err(idx, format!("invalid uuid: {e}")))
}

pub(crate) fn parse_day(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    s.parse::<NaiveDate>()
        .map_err(|e| decode_err(idx, format!("invalid date: {e}")))
}

pub(crate) fn parse_datetime(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| decode_err(idx, format!("invalid timestamp: {e}")))
}
