use crate::convert::error::ConvertError;
use crate::utils::constants::SECONDS_PER_HOUR;
use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M%z", "%Y-%m-%d %H:%M %z"];

/// Parses an observation time given as `YYYY-MM-DD HH:MM`, optionally followed by `Z` or a
/// numeric UTC offset. Times without an offset are taken to be UTC.
pub fn parse_time(time: &str) -> Result<DateTime<Utc>, ConvertError> {
    let trimmed = time.trim();

    let naive = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    if let Ok(t) = NaiveDateTime::parse_from_str(naive, TIME_FORMAT) {
        return Ok(Utc.from_utc_datetime(&t));
    }
    for format in OFFSET_FORMATS {
        if let Ok(t) = DateTime::parse_from_str(trimmed, format) {
            return Ok(t.with_timezone(&Utc));
        }
    }
    Err(ConvertError::Time(time.to_string()))
}

/// Anything that can stand in for the time of an observation.
pub trait TimeInput {
    fn resolve_utc(&self) -> Result<DateTime<Utc>, ConvertError>;
}

impl TimeInput for DateTime<Utc> {
    fn resolve_utc(&self) -> Result<DateTime<Utc>, ConvertError> {
        Ok(*self)
    }
}

impl TimeInput for NaiveDateTime {
    fn resolve_utc(&self) -> Result<DateTime<Utc>, ConvertError> {
        Ok(Utc.from_utc_datetime(self))
    }
}

impl TimeInput for &str {
    fn resolve_utc(&self) -> Result<DateTime<Utc>, ConvertError> {
        parse_time(self)
    }
}

impl TimeInput for String {
    fn resolve_utc(&self) -> Result<DateTime<Utc>, ConvertError> {
        parse_time(self)
    }
}

impl TimeInput for &DateTime<Utc> {
    fn resolve_utc(&self) -> Result<DateTime<Utc>, ConvertError> {
        Ok(**self)
    }
}

impl TimeInput for &String {
    fn resolve_utc(&self) -> Result<DateTime<Utc>, ConvertError> {
        parse_time(self)
    }
}

/// Seconds elapsed since midnight UT, including the fractional part.
pub fn ut_seconds(time: &DateTime<Utc>) -> f64 {
    time.num_seconds_from_midnight() as f64 + time.nanosecond() as f64 * 1e-9
}

pub fn ut_hours(time: &DateTime<Utc>) -> f64 {
    ut_seconds(time) / SECONDS_PER_HOUR
}
