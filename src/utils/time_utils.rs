use chrono::{DateTime, Datelike, NaiveDate, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";

    /// Days since 0001-01-01 (CE), the on-disk encoding of a date column.
    pub fn date_to_days(date: NaiveDate) -> i32 {
        date.num_days_from_ce()
    }

    pub fn days_to_date(days: i32) -> Option<NaiveDate> {
        NaiveDate::from_num_days_from_ce_opt(days)
    }

    /// Parses `2020-04-21`, `2020-04` (first of month) or `2020` (first of year).
    pub fn parse_flexible_date(text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if let Ok(date) = NaiveDate::parse_from_str(text, Self::STANDARD_TIME_FORMAT) {
            return Some(date);
        }
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", text), Self::STANDARD_TIME_FORMAT) {
            return Some(date);
        }
        if text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()) {
            return text.parse::<i32>().ok().and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
        }
        None
    }
}

// Time Helper functions

pub fn now_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    // Used for display purposes
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string(),
        None => "invalid timestamp".to_string(),
    }
}

pub fn format_duration(ms: i64) -> String {
    let secs = ms / 1000;
    if secs < 60 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }
    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }
    let months = days / 30;
    if months < 12 {
        return format!("{}M", months);
    }
    let years = months / 12;
    let rem_months = months % 12;
    format!("{}Y {}M", years, rem_months)
}
