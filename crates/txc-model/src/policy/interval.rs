//! `google.protobuf.Duration` JSON encoding for retry intervals.
//!
//! The canonical form is decimal seconds followed by `s`, with 0, 3, 6 or 9
//! fractional digits: `"1s"`, `"1.500s"`, `"0.000250s"`.
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{ModelError, ModelResult};

const NANOS_PER_MILLI: u32 = 1_000_000;
const NANOS_PER_MICRO: u32 = 1_000;

/// Render a duration in the canonical wire form.
pub fn format_interval(d: Duration) -> String {
    let secs = d.as_secs();
    let nanos = d.subsec_nanos();

    if nanos == 0 {
        format!("{secs}s")
    } else if nanos % NANOS_PER_MILLI == 0 {
        format!("{secs}.{:03}s", nanos / NANOS_PER_MILLI)
    } else if nanos % NANOS_PER_MICRO == 0 {
        format!("{secs}.{:06}s", nanos / NANOS_PER_MICRO)
    } else {
        format!("{secs}.{nanos:09}s")
    }
}

/// Parse a wire duration such as `"5s"` or `"0.250s"`.
///
/// Signs, exponents and more than nine fractional digits are rejected.
pub fn parse_interval(raw: &str) -> ModelResult<Duration> {
    let invalid = || ModelError::InvalidDuration(raw.to_string());

    let body = raw.trim().strip_suffix('s').ok_or_else(invalid)?;
    let (whole, frac) = match body.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (body, None),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let secs: u64 = whole.parse().map_err(|_| invalid())?;

    let nanos = match frac {
        None => 0,
        Some(f) if f.is_empty() || f.len() > 9 || !f.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(invalid());
        }
        Some(f) => {
            let scale = 10u32.pow(9 - f.len() as u32);
            f.parse::<u32>().map_err(|_| invalid())? * scale
        }
    };

    Ok(Duration::new(secs, nanos))
}

pub(crate) fn serialize<S>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_interval(*d))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_interval(&s).map_err(serde::de::Error::custom)
}
