use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::Serialize;

use crate::fallback::{first_of, Attempt};
use crate::raw::RawLeg;

pub const DATE_UNAVAILABLE: &str = "Date not available";
pub const TIME_UNAVAILABLE: &str = "N/A";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

// Offsets written as `+0100` as well as `+01:00`.
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d %b %Y", "%b %d, %Y"];

static RAW_DATE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // MM/DD/YYYY
        Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$").expect("valid regex"),
        // YYYY-MM-DD
        Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").expect("valid regex"),
        // DD MMM YYYY
        Regex::new(r"^[0-9]{1,2}\s[A-Za-z]{3}\s[0-9]{4}$").expect("valid regex"),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Departure,
    Arrival,
}

/// Parses a timestamp into the wall-clock time it names. Offsets are kept
/// as the local time at that offset, not converted.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.naive_local());
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(ndt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.naive_local());
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
}

pub fn format_date(dt: &NaiveDateTime) -> String {
    dt.format("%b %-d, %Y").to_string()
}

pub fn format_time(dt: &NaiveDateTime) -> String {
    dt.format("%H:%M").to_string()
}

pub fn is_recognized_date(text: &str) -> bool {
    RAW_DATE_PATTERNS.iter().any(|re| re.is_match(text))
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|s| !s.is_empty())
}

pub fn combined_datetime(leg: &RawLeg, side: Side) -> Option<&str> {
    match side {
        Side::Departure => leg.departure_date_time.as_deref(),
        Side::Arrival => leg.arrival_date_time.as_deref(),
    }
}

pub fn from_combined_datetime(leg: &RawLeg, side: Side) -> Option<String> {
    combined_datetime(leg, side)
        .and_then(parse_timestamp)
        .map(|dt| format_date(&dt))
}

pub fn from_leg_object(leg: &RawLeg, side: Side) -> Option<String> {
    let point = match side {
        Side::Departure => leg.departure.as_ref(),
        Side::Arrival => leg.arrival.as_ref(),
    }?;
    non_empty(point.date.as_deref()).map(String::from)
}

pub fn from_endpoint(leg: &RawLeg, side: Side) -> Option<String> {
    let endpoint = match side {
        Side::Departure => leg.origin.as_ref(),
        Side::Arrival => leg.destination.as_ref(),
    }?;
    non_empty(endpoint.date.as_deref()).map(String::from)
}

pub fn from_first_segment(leg: &RawLeg, side: Side) -> Option<String> {
    let segment = leg.segments.as_deref()?.first()?;
    let text = match side {
        Side::Departure => segment.departure_date_time.as_deref(),
        Side::Arrival => segment.arrival_date_time.as_deref(),
    };
    text.and_then(parse_timestamp).map(|dt| format_date(&dt))
}

pub fn from_raw_date(leg: &RawLeg, side: Side) -> Option<String> {
    let raw = match side {
        Side::Departure => leg.departure_date.as_deref(),
        Side::Arrival => leg.arrival_date.as_deref(),
    }?;
    is_recognized_date(raw).then(|| raw.to_string())
}

pub fn resolve_date_label(leg: &RawLeg, side: Side) -> String {
    let subject = match side {
        Side::Departure => "departure date",
        Side::Arrival => "arrival date",
    };
    first_of(
        subject,
        &[
            Attempt::new("combined datetime", &|| from_combined_datetime(leg, side)),
            Attempt::new("leg object", &|| from_leg_object(leg, side)),
            Attempt::new("endpoint", &|| from_endpoint(leg, side)),
            Attempt::new("first segment", &|| from_first_segment(leg, side)),
            Attempt::new("raw date", &|| from_raw_date(leg, side)),
        ],
    )
    .unwrap_or_else(|| DATE_UNAVAILABLE.to_string())
}

/// Clock time of a combined datetime. There is no fallback chain for
/// times: anything unparseable is `N/A`.
pub fn resolve_time_label(date_time: Option<&str>) -> String {
    date_time
        .and_then(parse_timestamp)
        .map(|dt| format_time(&dt))
        .unwrap_or_else(|| TIME_UNAVAILABLE.to_string())
}

pub fn leg_time_label(leg: &RawLeg, side: Side) -> String {
    resolve_time_label(combined_datetime(leg, side))
}
