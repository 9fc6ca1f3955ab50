//! Cell-level parsers used by type coercion
//!
//! Each parser returns `None` for anything it cannot interpret; a failed
//! parse marks the cell missing rather than failing the job.

use crate::constants::{DATE_FORMATS, DATETIME_FORMATS};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// `[-][D day[s][,]] H:MM:SS[.fff]`
static CLOCK_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(\d+)\s*days?,?\s*)?(\d+):(\d{1,2}):(\d{1,2}(?:\.\d+)?)$")
        .expect("clock duration pattern is valid")
});

/// ISO-8601 durations limited to days and clock components, e.g. `PT7H30M`
static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^P(?:(\d+(?:\.\d+)?)D)?(?:T(?:(\d+(?:\.\d+)?)H)?(?:(\d+(?:\.\d+)?)M)?(?:(\d+(?:\.\d+)?)S)?)?$",
    )
    .expect("ISO duration pattern is valid")
});

/// One `<number><unit>` component such as `1h`, `30 min` or `2 hours`
static UNIT_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*(milliseconds?|ms|days?|d|hours?|hrs?|hr|h|minutes?|mins?|min|m|seconds?|secs?|sec|s)",
    )
    .expect("unit component pattern is valid")
});

/// Parse a calendar date; date-times keep only their date part
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Parse a numeric reading; non-finite values count as missing
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse duration text into seconds
///
/// Bare numbers carry no unit and are rejected.
pub fn parse_duration_seconds(value: &str) -> Option<f64> {
    let value = value.trim();
    let (sign, body) = match value.strip_prefix('-') {
        Some(rest) => (-1.0, rest.trim_start()),
        None => (1.0, value.strip_prefix('+').unwrap_or(value).trim_start()),
    };
    if body.is_empty() {
        return None;
    }

    parse_clock(body)
        .or_else(|| parse_iso(body))
        .or_else(|| parse_unit_components(body))
        .map(|seconds| sign * seconds)
}

fn parse_clock(body: &str) -> Option<f64> {
    let caps = CLOCK_DURATION.captures(body)?;
    let days: f64 = caps.get(1).map_or(Some(0.0), |m| m.as_str().parse().ok())?;
    let hours: f64 = caps.get(2)?.as_str().parse().ok()?;
    let minutes: f64 = caps.get(3)?.as_str().parse().ok()?;
    let seconds: f64 = caps.get(4)?.as_str().parse().ok()?;

    if minutes >= 60.0 || seconds >= 60.0 {
        return None;
    }
    Some(days * 86_400.0 + hours * 3_600.0 + minutes * 60.0 + seconds)
}

fn parse_iso(body: &str) -> Option<f64> {
    let caps = ISO_DURATION.captures(body)?;
    let factors = [86_400.0, 3_600.0, 60.0, 1.0];

    let mut total = 0.0;
    let mut seen = false;
    for (idx, factor) in factors.iter().enumerate() {
        if let Some(m) = caps.get(idx + 1) {
            total += m.as_str().parse::<f64>().ok()? * factor;
            seen = true;
        }
    }
    seen.then_some(total)
}

fn parse_unit_components(body: &str) -> Option<f64> {
    let mut total = 0.0;
    let mut cursor = 0;
    let mut seen = false;

    for caps in UNIT_COMPONENT.captures_iter(body) {
        let whole = caps.get(0)?;
        if !is_separator(&body[cursor..whole.start()]) {
            return None;
        }
        let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
        total += amount * unit_seconds(caps.get(2)?.as_str())?;
        cursor = whole.end();
        seen = true;
    }

    (seen && is_separator(&body[cursor..])).then_some(total)
}

fn is_separator(gap: &str) -> bool {
    gap.chars().all(|c| c.is_whitespace() || c == ',')
}

fn unit_seconds(unit: &str) -> Option<f64> {
    match unit.to_ascii_lowercase().as_str() {
        "ms" | "millisecond" | "milliseconds" => Some(0.001),
        "d" | "day" | "days" => Some(86_400.0),
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(3_600.0),
        "m" | "min" | "mins" | "minute" | "minutes" => Some(60.0),
        "s" | "sec" | "secs" | "second" | "seconds" => Some(1.0),
        _ => None,
    }
}
