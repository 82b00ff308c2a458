use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%B %d, %Y"];

/// Parses the dates accepted in the posts file. Plain dates are midnight UTC.
pub fn parse_post_date(buf: &str) -> Result<NaiveDateTime, String> {
    let buf = buf.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Ok(date_time.naive_utc());
    }

    for fmt in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(buf, fmt) {
            return Ok(date_time);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(buf, fmt) {
            if let Some(date_time) = date.and_hms_opt(0, 0, 0) {
                return Ok(date_time);
            }
        }
    }

    Err(format!("Unable to parse date {}", buf))
}

/// Milliseconds since epoch used for ordering. Unparseable dates are epoch 0.
pub fn post_timestamp(buf: &str) -> i64 {
    match parse_post_date(buf) {
        Ok(date_time) => date_time.and_utc().timestamp_millis(),
        Err(_) => 0,
    }
}

/// `Aug 5, 2025`, or the raw value when it can't be parsed.
pub fn format_post_date(buf: &str) -> String {
    match parse_post_date(buf) {
        Ok(date_time) => date_time.format("%b %-d, %Y").to_string(),
        Err(_) => buf.to_string(),
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
