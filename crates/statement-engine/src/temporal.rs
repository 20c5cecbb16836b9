//! Formal date and time phrasing
//!
//! Accepts the formats the capture form produces (`2025/1/10`, the
//! `2025-01-10` date-input form, `2025.1.10`, `2025年1月10日`, and `19:30`).
//! Anything else passes through unchanged so a typo never blocks a statement.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::Locale;

lazy_static! {
    /// Leading Y/M/D date, trailing text ignored
    static ref DATE_PATTERN: Regex =
        Regex::new(r"^(\d{4})[/\-.年](\d{1,2})[/\-.月](\d{1,2})").unwrap();

    /// Leading HH:MM, trailing text ignored
    static ref TIME_PATTERN: Regex = Regex::new(r"^(\d{1,2}):(\d{2})").unwrap();

    /// Whole-string date with optional time, used for ordering
    static ref DATE_TIME_PATTERN: Regex = Regex::new(
        r"^(\d{4})[/\-.年](\d{1,2})[/\-.月](\d{1,2})日?(?:[ T]+(\d{1,2}):(\d{2})(?::(\d{2}))?)?$"
    )
    .unwrap();
}

/// Render a raw date string as a formal long-form date
pub fn format_date(raw: &str, locale: Locale) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }

    match parse_ymd(s) {
        Some(date) => format_calendar_date(date, locale),
        None => {
            if DATE_PATTERN.is_match(s) {
                tracing::warn!(date = s, "date out of calendar range, passing through");
            }
            s.to_string()
        }
    }
}

/// Render a raw time string as an approximate formal time
pub fn format_time(raw: &str, locale: Locale) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }

    let parsed = TIME_PATTERN.captures(s).and_then(|caps| {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        NaiveTime::from_hms_opt(hour, minute, 0).map(|_| (hour, minute))
    });

    match (parsed, locale) {
        (Some((hour, minute)), Locale::English) => format!("around {:02}:{:02}", hour, minute),
        (Some((hour, minute)), Locale::Japanese) => format!("{}時{}分頃", hour, minute),
        (None, Locale::English) => format!("around {}", s),
        (None, Locale::Japanese) => format!("{}頃", s),
    }
}

/// Formal phrase for a calendar date, e.g. "January 10, 2025"
pub fn format_calendar_date(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::English => date.format("%B %-d, %Y").to_string(),
        Locale::Japanese => date.format("%Y年%-m月%-d日").to_string(),
    }
}

/// Parse the leading Y/M/D of a string into a calendar date
pub fn parse_ymd(s: &str) -> Option<NaiveDate> {
    let caps = DATE_PATTERN.captures(s.trim())?;
    NaiveDate::from_ymd_opt(caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)
}

/// Parse a whole "date [time]" string; a missing time means midnight
pub(crate) fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let caps = DATE_TIME_PATTERN.captures(s.trim())?;
    let date = NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )?;

    let field = |i: usize| -> Option<u32> {
        caps.get(i).map_or(Some(0), |m| m.as_str().parse().ok())
    };
    let time = NaiveTime::from_hms_opt(field(4)?, field(5)?, field(6)?)?;

    Some(date.and_time(time))
}
