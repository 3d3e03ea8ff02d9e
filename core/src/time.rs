use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use anyhow::{anyhow, Result};

pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const INPUT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const STORED_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const OUTPUT_DATE_FORMAT: &str = "%b %-d %Y";
const OUTPUT_DATE_TIME_FORMAT: &str = "%b %-d %Y, %I:%M %p";
const OUTPUT_TIME_FORMAT: &str = "%I:%M %p";

const DATE_SHAPE: &str = "dddd-dd-dd";
const DATE_TIME_SHAPE: &str = "dddd-dd-dd dd:dd";
const STORED_DATE_TIME_SHAPE: &str = "dddd-dd-ddTdd:dd";

/// `YYYY-MM-DD` only.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if !has_shape(input, DATE_SHAPE) {
        return Err(anyhow!("Could not parse date '{}': expected YYYY-MM-DD", input));
    }
    NaiveDate::parse_from_str(input, INPUT_DATE_FORMAT)
        .map_err(|e| anyhow!("Could not parse date '{}': {}", input, e))
}

/// `YYYY-MM-DD HH:MM`, or `YYYY-MM-DD` which means midnight.
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    if has_shape(input, DATE_TIME_SHAPE) {
        return NaiveDateTime::parse_from_str(input, INPUT_DATE_TIME_FORMAT)
            .map_err(|e| anyhow!("Could not parse date-time '{}': {}", input, e));
    }
    parse_date(input)
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| anyhow!("Could not parse date-time: {}", input))
}

/// Reads an event timestamp back from a task file. Hand-edited files may use
/// the input forms instead of the stored `T` form.
pub fn parse_stored_date_time(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    if has_shape(input, STORED_DATE_TIME_SHAPE) {
        return NaiveDateTime::parse_from_str(input, STORED_DATE_TIME_FORMAT)
            .map_err(|e| anyhow!("Could not parse stored date-time '{}': {}", input, e));
    }
    parse_date_time(input)
}

/// Exact layout check run before chrono, which also takes `2023-6-6` and
/// signed years. `d` is an ASCII digit, anything else must match as is.
fn has_shape(input: &str, shape: &str) -> bool {
    input.len() == shape.len()
        && input.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'd' => c.is_ascii_digit(),
            _ => c == s,
        })
}

pub fn store_date(date: NaiveDate) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}

pub fn store_date_time(dt: NaiveDateTime) -> String {
    dt.format(STORED_DATE_TIME_FORMAT).to_string()
}

/// `Jun 6 2023`
pub fn format_date(date: NaiveDate) -> String {
    date.format(OUTPUT_DATE_FORMAT).to_string()
}

/// `Aug 6 2023, 02:00 PM`
pub fn format_date_time(dt: NaiveDateTime) -> String {
    dt.format(OUTPUT_DATE_TIME_FORMAT).to_string()
}

/// `04:00 PM`
pub fn format_time(dt: NaiveDateTime) -> String {
    dt.format(OUTPUT_TIME_FORMAT).to_string()
}

pub fn is_midnight(dt: NaiveDateTime) -> bool {
    dt.time() == NaiveTime::MIN
}
