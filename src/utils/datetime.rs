//! Date and time utility functions
//!
//! Task due dates are stored as strings in one canonical encoding,
//! `YYYY-MM-DD HH:MM` in local wall time without a zone. This module converts
//! the formats users and older clients produce into that encoding and renders
//! stored values in a human-readable form ("today at 09:00").

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Canonical due-date encoding
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Date-only part of the canonical encoding
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// M/D/YY H:mm, as written by the mobile date picker
const PICKER_FORMAT: &str = "%m/%d/%y %H:%M";
const SECONDS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ISO_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a due date in any accepted form.
///
/// Accepted, in order:
/// * canonical `2025-01-15 14:30`
/// * picker `1/15/25 14:30`
/// * `2025-01-15 14:30:00`, optionally followed by a zone name (the zone is dropped)
/// * `2025-01-15T14:30:00` and RFC 3339 (converted to local time)
/// * bare `2025-01-15` (midnight)
pub fn parse_due_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(input, DUE_DATE_FORMAT) {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, PICKER_FORMAT) {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, SECONDS_FORMAT) {
        return Some(dt);
    }
    if let Some((head, _zone)) = input.rsplit_once(' ') {
        if let Ok(dt) = NaiveDateTime::parse_from_str(head.trim_end(), SECONDS_FORMAT) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, ISO_LOCAL_FORMAT) {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Some(date.and_time(NaiveTime::MIN));
    }

    None
}

/// Encode a date-time in the canonical due-date format
pub fn format_due_date(dt: NaiveDateTime) -> String {
    dt.format(DUE_DATE_FORMAT).to_string()
}

/// Normalize user input into the canonical encoding.
///
/// Blank input means "no due date" and yields `Ok(None)`. Input that matches no
/// accepted form is returned as the error value.
pub fn normalize_due_date(input: &str) -> Result<Option<String>, String> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_due_date(input)
        .map(|dt| Some(format_due_date(dt)))
        .ok_or_else(|| input.to_string())
}

/// Format a date in human-readable form relative to `today`
pub fn format_human_date_from(input_date: NaiveDate, today: NaiveDate) -> String {
    let days_diff = (input_date - today).num_days();

    match days_diff {
        -1 => "yesterday".to_string(),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        diff if diff > 1 && diff <= 7 => format!("next {}", weekday_name(input_date.weekday())),
        diff if (-7..-1).contains(&diff) => format!("last {}", weekday_name(input_date.weekday())),
        diff if diff > 7 && diff <= 30 => format!("in {} days", diff),
        diff if (-30..-7).contains(&diff) => format!("{} days ago", -diff),
        _ => {
            if input_date.year() == today.year() {
                input_date.format("%b %d").to_string()
            } else {
                input_date.format("%b %d, %Y").to_string()
            }
        }
    }
}

/// Render a stored due date for display, e.g. "tomorrow at 09:00".
///
/// Values that do not parse (older free-text entries) are shown as stored.
pub fn format_human_due(stored: &str) -> String {
    match parse_due_date(stored) {
        Some(dt) => {
            let today = Local::now().date_naive();
            format!("{} at {}", format_human_date_from(dt.date(), today), dt.format("%H:%M"))
        }
        None => stored.to_string(),
    }
}

/// Get a human-readable weekday name
fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
