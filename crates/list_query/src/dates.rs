//! Parsing of the ISO-like date strings carried by fixture records.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use contracts::shared::list_state::DateBucket;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]` and RFC 3339 strings.
///
/// Offsets are kept as the wall-clock time of the record, so
/// "2024-03-15T23:30:00+03:00" is still March 15th.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    parse_with(raw, |dt| dt.naive_local())
}

/// Like [`parse_date`], but RFC 3339 values are shifted to UTC so that
/// values with different offsets compare by the moment they denote.
/// Strings without an offset are taken as they are.
pub fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    parse_with(raw, |dt| dt.naive_utc())
}

fn parse_with(
    raw: &str,
    with_offset: fn(DateTime<FixedOffset>) -> NaiveDateTime,
) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset(dt));
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Calendar day of a date string
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    parse_date(raw).map(|dt| dt.date())
}

/// The day a bucket selects relative to `reference`; `None` for [`DateBucket::All`]
pub fn bucket_day(bucket: DateBucket, reference: NaiveDate) -> Option<NaiveDate> {
    match bucket {
        DateBucket::All => None,
        DateBucket::Today => Some(reference),
        DateBucket::Tomorrow => reference.succ_opt(),
    }
}
