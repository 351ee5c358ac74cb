use chrono::{NaiveDate, NaiveDateTime};
use taskboard::utils::datetime::*;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

#[test]
fn test_parse_canonical_and_legacy_forms() {
    let expected = at(2025, 1, 15, 14, 30);
    assert_eq!(parse_due_date("2025-01-15 14:30"), Some(expected));
    assert_eq!(parse_due_date("1/15/25 14:30"), Some(expected));
    assert_eq!(parse_due_date("01/15/25 14:30"), Some(expected));
    assert_eq!(parse_due_date("2025-01-15 14:30:00"), Some(expected));
    assert_eq!(parse_due_date("2025-01-15 14:30:00 CET"), Some(expected));
    assert_eq!(parse_due_date("2025-01-15T14:30:00"), Some(expected));
    assert_eq!(parse_due_date("  2025-01-15 14:30  "), Some(expected));
}

#[test]
fn test_parse_bare_date_is_midnight() {
    assert_eq!(parse_due_date("2025-01-15"), Some(at(2025, 1, 15, 0, 0)));
}

#[test]
fn test_parse_rejects_garbage() {
    assert_eq!(parse_due_date("next friday"), None);
    assert_eq!(parse_due_date("2025-13-40 10:00"), None);
    assert_eq!(parse_due_date(""), None);
}

#[test]
fn test_normalize_due_date() {
    assert_eq!(normalize_due_date(""), Ok(None));
    assert_eq!(normalize_due_date("   "), Ok(None));
    assert_eq!(
        normalize_due_date("1/15/25 9:05"),
        Ok(Some("2025-01-15 09:05".to_string()))
    );
    assert_eq!(normalize_due_date("soon"), Err("soon".to_string()));
}

#[test]
fn test_format_due_date() {
    assert_eq!(format_due_date(at(2024, 12, 31, 23, 59)), "2024-12-31 23:59");
}

#[test]
fn test_format_human_date_relative_days() {
    let today = NaiveDate::from_ymd_opt(2023, 12, 20).unwrap(); // Wednesday
    let day = |d| NaiveDate::from_ymd_opt(2023, 12, d).unwrap();

    assert_eq!(format_human_date_from(day(19), today), "yesterday");
    assert_eq!(format_human_date_from(day(20), today), "today");
    assert_eq!(format_human_date_from(day(21), today), "tomorrow");
    assert_eq!(format_human_date_from(day(25), today), "next Monday");
    assert_eq!(format_human_date_from(day(15), today), "last Friday");
}

#[test]
fn test_format_human_date_far_away() {
    let today = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();

    assert_eq!(
        format_human_date_from(NaiveDate::from_ymd_opt(2023, 6, 21).unwrap(), today),
        "in 20 days"
    );
    assert_eq!(
        format_human_date_from(NaiveDate::from_ymd_opt(2023, 5, 12).unwrap(), today),
        "20 days ago"
    );
    assert_eq!(
        format_human_date_from(NaiveDate::from_ymd_opt(2023, 9, 3).unwrap(), today),
        "Sep 03"
    );
    assert_eq!(
        format_human_date_from(NaiveDate::from_ymd_opt(2024, 9, 3).unwrap(), today),
        "Sep 03, 2024"
    );
}

#[test]
fn test_format_human_due_falls_back_to_stored_text() {
    assert_eq!(format_human_due("whenever"), "whenever");
    assert!(format_human_due("2025-01-15 14:30").ends_with(" at 14:30"));
}
