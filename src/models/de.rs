//! Lenient deserializers for backend fields
//!
//! The backend serializes booleans as `0/1`, numbers as strings and
//! timestamps in either RFC 3339 or `YYYY-MM-DD HH:MM:SS`.
//! Timestamps in any other shape decode as `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

pub fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_i64().unwrap_or(0) != 0),
        Value::String(s) => Ok(matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")),
        Value::Null => Ok(false),
        other => Err(de::Error::custom(format!("expected boolean, got {}", other))),
    }
}

pub fn flexible_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("expected integer, got {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("expected integer, got {:?}", s))),
        other => Err(de::Error::custom(format!("expected integer, got {}", other))),
    }
}

pub fn flexible_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(|f| Some(f.floor() as i64))
            .map_err(|_| de::Error::custom(format!("expected number, got {:?}", s))),
        other => Err(de::Error::custom(format!("expected number, got {}", other))),
    }
}

/// Accepts numeric or string identifiers, yielding their text
pub fn flexible_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("expected string, got {}", other))),
    }
}

pub fn flexible_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Null => Ok(None),
        other => Err(de::Error::custom(format!("expected string, got {}", other))),
    }
}

pub fn flexible_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => {
            let parsed = parse_timestamp(&s);
            if parsed.is_none() {
                debug!(raw = %s, "Ignoring unrecognised timestamp");
            }
            Ok(parsed)
        }
    }
}

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(deserialize_with = "flexible_bool")]
        active: bool,
        #[serde(deserialize_with = "flexible_i64")]
        number: i64,
        #[serde(default, deserialize_with = "flexible_datetime")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_accepts_laravel_shapes() {
        let row: Row = serde_json::from_str(r#"{"active": 1, "number": "12", "at": "2025-03-01 10:00:00"}"#).unwrap();
        assert!(row.active);
        assert_eq!(row.number, 12);
        assert_eq!(row.at, Some(Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap()));
    }

    #[test]
    fn test_accepts_iso_with_fraction() {
        let row: Row = serde_json::from_str(
            r#"{"active": false, "number": 3, "at": "2025-03-01T10:00:00.000000Z"}"#,
        )
        .unwrap();
        assert!(!row.active);
        assert_eq!(row.at, Some(Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap()));
    }

    #[test]
    fn test_offsetless_iso_and_garbage_timestamps() {
        let row: Row = serde_json::from_str(r#"{"active": 1, "number": 1, "at": "2025-02-01T09:00:00"}"#).unwrap();
        assert_eq!(row.at, Some(Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap()));

        let row: Row = serde_json::from_str(r#"{"active": 1, "number": 1, "at": "last tuesday"}"#).unwrap();
        assert!(row.at.is_none());
    }

    #[test]
    fn test_missing_timestamp_is_none() {
        let row: Row = serde_json::from_str(r#"{"active": "0", "number": 1}"#).unwrap();
        assert!(!row.active);
        assert!(row.at.is_none());
    }
}
