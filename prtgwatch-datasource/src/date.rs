//! Conversion between dashboard timestamps and PRTG date strings.
//!
//! The server speaks two different date dialects. Filter parameters
//! (`sdate`/`edate`) want the all-hyphen form `YYYY-MM-DD-HH-MM-SS`;
//! response bodies carry `DD/MM/YYYY HH:MM:SS - <label>` strings. The
//! dashboard side of both conversions is epoch milliseconds.

use chrono::{Datelike, NaiveDate, TimeZone, Timelike, Utc};

use crate::error::DataSourceError;

/// Three-letter month abbreviations mapped to the server's two-digit
/// month numbers.
const MONTHS: [(&str, &str); 12] = [
    ("Jan", "01"),
    ("Feb", "02"),
    ("Mar", "03"),
    ("Apr", "04"),
    ("May", "05"),
    ("Jun", "06"),
    ("Jul", "07"),
    ("Aug", "08"),
    ("Sep", "09"),
    ("Oct", "10"),
    ("Nov", "11"),
    ("Dec", "12"),
];

/// Render a dashboard timestamp (epoch milliseconds, UTC) as a PRTG
/// filter-date string: `YYYY-MM-DD-HH-MM-SS`.
///
/// The month goes through the fixed abbreviation table; an abbreviation
/// missing from it is an error rather than a garbage component.
pub fn to_server_date(timestamp_ms: i64) -> Result<String, DataSourceError> {
    let datetime = Utc
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .ok_or_else(|| {
            DataSourceError::DateParse(format!("timestamp out of range: {timestamp_ms}"))
        })?;

    let month_abbrev = datetime.format("%b").to_string();
    let month = MONTHS
        .iter()
        .find(|(abbrev, _)| *abbrev == month_abbrev)
        .map(|(_, number)| *number)
        .ok_or_else(|| {
            DataSourceError::DateParse(format!("unknown month abbreviation: {month_abbrev}"))
        })?;

    Ok(format!(
        "{:04}-{}-{:02}-{:02}-{:02}-{:02}",
        datetime.year(),
        month,
        datetime.day(),
        datetime.hour(),
        datetime.minute(),
        datetime.second()
    ))
}

/// Parse a server response date (`DD/MM/YYYY HH:MM:SS - <label>`) into
/// epoch milliseconds.
///
/// The label after `" - "` is discarded and the day/month order is swapped
/// explicitly; the server always writes day-first regardless of locale.
/// A missing time-of-day is treated as midnight.
pub fn from_server_date(raw: &str) -> Result<i64, DataSourceError> {
    let head = raw.split(" - ").next().unwrap_or(raw).trim();

    let parts: Vec<&str> = head.split('/').collect();
    if parts.len() != 3 {
        return Err(DataSourceError::DateParse(format!(
            "expected DD/MM/YYYY date, got {raw:?}"
        )));
    }

    let day = parse_component(parts[0], raw)?;
    let month = parse_component(parts[1], raw)?;

    // Third component is "YYYY" optionally followed by " HH:MM:SS".
    let mut tail = parts[2].split_whitespace();
    let year: i32 = tail
        .next()
        .unwrap_or("")
        .parse()
        .map_err(|_| DataSourceError::DateParse(format!("bad year in {raw:?}")))?;

    let (hour, minute, second) = match tail.next() {
        Some(time) => parse_time(time, raw)?,
        None => (0, 0, 0),
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DataSourceError::DateParse(format!("invalid calendar date in {raw:?}")))?;
    let datetime = date
        .and_hms_opt(hour, minute, second)
        .ok_or_else(|| DataSourceError::DateParse(format!("invalid time of day in {raw:?}")))?;

    Ok(datetime.and_utc().timestamp_millis())
}

fn parse_component(component: &str, raw: &str) -> Result<u32, DataSourceError> {
    component
        .parse()
        .map_err(|_| DataSourceError::DateParse(format!("bad date component in {raw:?}")))
}

fn parse_time(time: &str, raw: &str) -> Result<(u32, u32, u32), DataSourceError> {
    let mut pieces = time.split(':');
    let hour = parse_component(pieces.next().unwrap_or(""), raw)?;
    let minute = parse_component(pieces.next().unwrap_or("0"), raw)?;
    let second = parse_component(pieces.next().unwrap_or("0"), raw)?;
    Ok((hour, minute, second))
}
