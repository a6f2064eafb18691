use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::DomainError;

/// Parse a timestamp in the fixed `YYYY-MM-DD[ HH:MM:SS[.ffffff]]` form.
///
/// The shape is checked first (component count and digit widths); a value
/// that does not match yields `Format`. Components that match the shape
/// but do not form a real calendar date or a valid 24-hour wall-clock
/// time yield `Range`.
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime, DomainError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DomainError::Format("timestamp must not be empty".into()));
    }

    let (date_part, time_part) = match s.split_once(' ') {
        Some((date, time)) => (date, Some(time)),
        None => (s, None),
    };

    let (year, month, day) = parse_date_fields(date_part)?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        DomainError::Range(format!("{date_part} is not a real calendar date"))
    })?;

    let time = match time_part {
        Some(time_part) => parse_time_fields(time_part)?,
        None => NaiveTime::MIN,
    };

    Ok(date.and_time(time))
}

/// Like [`parse_datetime`], but anchored to UTC for persistence.
pub fn parse_datetime_utc(input: &str) -> Result<DateTime<Utc>, DomainError> {
    Ok(parse_datetime(input)?.and_utc())
}

/// Re-encode a timestamp as the single epoch-milliseconds value used by
/// every public representation.
pub fn epoch_millis(timestamp: &DateTime<Utc>) -> i64 {
    timestamp.timestamp_millis()
}

fn parse_date_fields(s: &str) -> Result<(i32, u32, u32), DomainError> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return Err(DomainError::Format(format!(
            "{s} does not match YYYY-MM-DD"
        )));
    }
    let year = digits(parts[0], 4, "year")?;
    let month = digits(parts[1], 2, "month")?;
    let day = digits(parts[2], 2, "day")?;
    Ok((year as i32, month, day))
}

fn parse_time_fields(s: &str) -> Result<NaiveTime, DomainError> {
    let (hms, fraction) = match s.split_once('.') {
        Some((hms, frac)) => (hms, Some(frac)),
        None => (s, None),
    };

    let parts: Vec<&str> = hms.split(':').collect();
    if parts.len() != 3 {
        return Err(DomainError::Format(format!(
            "{s} does not match HH:MM:SS[.ffffff]"
        )));
    }
    let hour = digits(parts[0], 2, "hour")?;
    let minute = digits(parts[1], 2, "minute")?;
    let second = digits(parts[2], 2, "second")?;

    let micros = match fraction {
        Some(frac) => {
            if frac.is_empty() || frac.len() > 6 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(DomainError::Format(format!(
                    "fractional seconds must be 1-6 digits, got {frac:?}"
                )));
            }
            // Right-pad to microsecond precision: ".5" means 500000 µs.
            let mut padded = frac.to_owned();
            while padded.len() < 6 {
                padded.push('0');
            }
            padded.parse::<u32>().expect("validated digits")
        }
        None => 0,
    };

    NaiveTime::from_hms_micro_opt(hour, minute, second, micros).ok_or_else(|| {
        DomainError::Range(format!("{s} is not a valid 24-hour wall-clock time"))
    })
}

fn digits(s: &str, width: usize, field: &str) -> Result<u32, DomainError> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::Format(format!(
            "{field} must be exactly {width} digits, got {s:?}"
        )));
    }
    s.parse()
        .map_err(|_| DomainError::Format(format!("{field} is not numeric: {s:?}")))
}
