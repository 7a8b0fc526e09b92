use chrono::{Duration, Local, NaiveDate};

/// Local wall-clock date. Day boundaries follow the machine's time zone,
/// not UTC, so a quest checked at 23:30 lands on the right day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// The date key `days_back` days before `key`; negative values move
/// forward. `None` when `key` does not parse.
pub fn offset_key(key: &str, days_back: i64) -> Option<String> {
    parse_key(key).map(|date| date_key(date - Duration::days(days_back)))
}
