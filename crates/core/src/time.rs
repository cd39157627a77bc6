//! Conversions between protobuf timestamps and `chrono`

use chrono::{DateTime, TimeZone, Utc};
use prost_types::Timestamp;

/// Protobuf timestamp for a UTC instant
pub fn to_timestamp(at: DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: at.timestamp(),
        nanos: at.timestamp_subsec_nanos() as i32,
    }
}

/// UTC instant of a protobuf timestamp, `None` if out of chrono's range
pub fn from_timestamp(ts: &Timestamp) -> Option<DateTime<Utc>> {
    let mut normalized = ts.clone();
    normalized.normalize();
    Utc.timestamp_opt(normalized.seconds, normalized.nanos as u32)
        .single()
}
