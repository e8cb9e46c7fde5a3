//! Completed-review records and their schema-checked decoding.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::FetchError;

/// One completed review: when it was finished and what it earned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewEvent {
    pub id: Option<u64>,
    pub timestamp: DateTime<Utc>,
    pub points: f64,
}

impl ReviewEvent {
    pub fn new(timestamp: DateTime<Utc>, points: f64) -> Self {
        Self {
            id: None,
            timestamp,
            points,
        }
    }
}

/// Wire shape of a submission. Only the fields we use are declared.
#[derive(Debug, Deserialize)]
struct RawSubmission {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    completed_at: Option<String>,
    #[serde(default)]
    price: Option<serde_json::Value>,
}

/// Decode a response body into review events.
///
/// The body must be a JSON array. Every record needs a `completed_at`
/// timestamp and a `price`; the first bad record fails the whole decode.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] naming the offending record and field.
pub fn decode_events(body: &str) -> Result<Vec<ReviewEvent>, FetchError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| FetchError::Parse(format!("body is not valid JSON: {e}")))?;

    let records = value
        .as_array()
        .ok_or_else(|| FetchError::Parse(format!("expected a JSON array, got {}", kind(&value))))?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| decode_record(index, record))
        .collect()
}

fn decode_record(index: usize, record: &serde_json::Value) -> Result<ReviewEvent, FetchError> {
    let raw = RawSubmission::deserialize(record)
        .map_err(|e| FetchError::Parse(format!("record {index}: {e}")))?;

    let completed_at = raw
        .completed_at
        .ok_or_else(|| missing(index, "completed_at"))?;
    let timestamp = parse_timestamp(&completed_at).ok_or_else(|| {
        FetchError::Parse(format!(
            "record {index}: cannot parse completed_at '{completed_at}'"
        ))
    })?;

    let price = raw.price.ok_or_else(|| missing(index, "price"))?;
    let points = parse_points(&price).ok_or_else(|| {
        FetchError::Parse(format!("record {index}: price {price} is not a number"))
    })?;

    Ok(ReviewEvent {
        id: raw.id.as_ref().and_then(serde_json::Value::as_u64),
        timestamp,
        points,
    })
}

fn missing(index: usize, field: &str) -> FetchError {
    FetchError::Parse(format!("record {index}: missing field '{field}'"))
}

/// Timestamps carry an offset, or none at all in which case they are UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Prices arrive either as numbers or as decimal strings.
fn parse_points(value: &serde_json::Value) -> Option<f64> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
