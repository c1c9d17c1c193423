//! Timestamp handling for `DTSTART`/`DTEND` values.

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const FLOATING_FORMAT: &str = "%Y%m%dT%H%M%S";

static TIMESTAMP_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{8}T\d{6}Z?$").expect("timestamp pattern is valid"));

/// Parse a compact timestamp, trying the `Z`-suffixed form first and the
/// bare form second.
pub fn parse_naive_timestamp(value: &str) -> Option<NaiveDateTime> {
    if !TIMESTAMP_SHAPE.is_match(value) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, UTC_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, FLOATING_FORMAT))
        .ok()
}

/// Resolve a TZID parameter against the tz database.
pub fn resolve_timezone(tzid: &str) -> Option<Tz> {
    match Tz::from_str(tzid.trim()) {
        Ok(tz) => Some(tz),
        Err(_) => {
            warn!("Unknown TZID '{}', treating value as UTC", tzid);
            None
        }
    }
}

/// Interpret `naive` in `tz` (UTC when absent) and convert to local time.
///
/// Ambiguous wall-clock times resolve to the earlier instant. Times inside a
/// DST gap are shifted forward by one hour.
pub fn localize(naive: NaiveDateTime, tz: Option<Tz>) -> DateTime<Local> {
    let utc = match tz {
        Some(tz) => tz
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
        None => Utc.from_utc_datetime(&naive),
    };
    utc.with_timezone(&Local)
}

/// Full pipeline for a timestamp field value. `None` marks an unparsable value.
pub fn parse_timestamp(value: &str, tzid: Option<&str>) -> Option<DateTime<Local>> {
    let Some(naive) = parse_naive_timestamp(value) else {
        debug!("Unparsable timestamp value '{}'", value);
        return None;
    };
    let tz = tzid.and_then(resolve_timezone);
    Some(localize(naive, tz))
}
