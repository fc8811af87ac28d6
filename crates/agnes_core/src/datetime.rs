//! Conversions between the date strings users type, the strings shown back to
//! them, and `time`'s calendar values.
//!
//! Input accepts `yyyy-MM-dd HHmm` or `yyyy-MM-dd`; a bare date means midnight.
//! Output renders `MMM dd yyyy`, adding ` HH:mm` only when the time is not
//! midnight, so a midnight deadline and a date-only deadline look the same.

use crate::error::AppError;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

pub const DATE_FORMAT_HINT: &str = "Date format should be yyyy-MM-dd or yyyy-MM-dd HHmm";
pub const DAY_FORMAT_HINT: &str = "Date format should be yyyy-MM-dd";

pub fn parse_date_time(input: &str) -> Result<PrimitiveDateTime, AppError> {
    let trimmed = input.trim();
    if let Ok(value) = PrimitiveDateTime::parse(
        trimmed,
        format_description!("[year]-[month]-[day] [hour][minute]"),
    ) {
        return Ok(value);
    }

    Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
        .map(Date::midnight)
        .map_err(|_| AppError::invalid_description(DATE_FORMAT_HINT))
}

pub fn parse_date(input: &str) -> Result<Date, AppError> {
    Date::parse(input.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| AppError::invalid_description(DAY_FORMAT_HINT))
}

pub fn format_date_time(value: PrimitiveDateTime) -> String {
    if value.time() == Time::MIDNIGHT {
        return format_date(value.date());
    }

    value
        .format(format_description!(
            "[month repr:short] [day] [year] [hour]:[minute]"
        ))
        .unwrap_or_else(|_| value.to_string())
}

pub fn format_date(value: Date) -> String {
    value
        .format(format_description!("[month repr:short] [day] [year]"))
        .unwrap_or_else(|_| value.to_string())
}

/// Reads back a value written by [`format_date_time`].
pub fn parse_display(input: &str) -> Result<PrimitiveDateTime, AppError> {
    let trimmed = input.trim();
    if let Ok(value) = PrimitiveDateTime::parse(
        trimmed,
        format_description!("[month repr:short] [day] [year] [hour]:[minute]"),
    ) {
        return Ok(value);
    }

    Date::parse(
        trimmed,
        format_description!("[month repr:short] [day] [year]"),
    )
    .map(Date::midnight)
    .map_err(|_| AppError::invalid_data(format!("unreadable date '{trimmed}'")))
}
