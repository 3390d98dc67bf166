//! Разбор и форматирование дат, приходящих из формы и от сервера.
//!
//! Всё считается в UTC: строка без зоны трактуется как время UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::error::{FeedClientError, FeedClientResult};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Разбирает дату в одном из поддерживаемых видов:
/// RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]`, `YYYY-MM-DD HH:MM:SS`.
pub fn parse_date(raw: &str) -> FeedClientResult<DateTime<Utc>> {
    let value = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| FeedClientError::InvalidDate(raw.to_string()))
}

/// Переводит дату в ISO 8601 с миллисекундами: `2024-01-05T00:00:00.000Z`.
pub fn date_to_iso_string(raw: &str) -> FeedClientResult<String> {
    let date = parse_date(raw)?;
    Ok(date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Форматирует дату для карточек: `Mar 2, 2024`.
pub fn format_date(raw: &str) -> FeedClientResult<String> {
    let date = parse_date(raw)?;
    Ok(format_day(&date))
}

/// То же, что [`format_date`], для уже разобранной даты.
pub fn format_day(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}
