use chrono::prelude::*;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Event date: `{0}` is not a valid timestamp")]
pub struct InvalidEventDate(pub String);

// Formats with an offset but without seconds
const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

// Formats without an offset. These are interpreted as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses the raw `eventDate` stored on a `Favorite` into a UTC timestamp.
///
/// Accepted inputs:
/// - RFC 3339, e.g. `2024-01-02T12:00:00Z` or `2024-01-02T13:00:00+01:00`
/// - date and time without seconds, e.g. `2024-01-02T13:00+01:00`
/// - date and time without an offset, e.g. `2024-01-02T12:00Z`
///   or `2024-01-02 12:00`, interpreted as UTC
/// - a plain date, e.g. `2024-01-02`, interpreted as UTC midnight
pub fn parse_event_date(raw: &str) -> Result<DateTime<Utc>, InvalidEventDate> {
    let datestr = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(datestr) {
        return Ok(date.with_timezone(&Utc));
    }
    for format in OFFSET_DATETIME_FORMATS.iter() {
        if let Ok(date) = DateTime::parse_from_str(datestr, format) {
            return Ok(date.with_timezone(&Utc));
        }
    }

    let naive = datestr
        .strip_suffix('Z')
        .or_else(|| datestr.strip_suffix('z'))
        .unwrap_or(datestr);
    for format in NAIVE_DATETIME_FORMATS.iter() {
        if let Ok(date) = NaiveDateTime::parse_from_str(naive, format) {
            return Ok(Utc.from_utc_datetime(&date));
        }
    }

    NaiveDate::parse_from_str(datestr, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| Utc.from_utc_datetime(&date))
        .ok_or_else(|| InvalidEventDate(raw.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn it_accepts_valid_dates() {
        let valid_dates = vec![
            ("2024-01-02T12:00:00Z", utc(2024, 1, 2, 12, 0)),
            ("2024-01-02T12:00:00.000Z", utc(2024, 1, 2, 12, 0)),
            ("2024-01-02T13:00:00+01:00", utc(2024, 1, 2, 12, 0)),
            ("2024-01-02T12:00Z", utc(2024, 1, 2, 12, 0)),
            ("2024-01-02T12:00+01:00", utc(2024, 1, 2, 11, 0)),
            ("2024-01-02T07:30-04:30", utc(2024, 1, 2, 12, 0)),
            ("2024-01-02 13:00+01:00", utc(2024, 1, 2, 12, 0)),
            ("2024-01-02T12:00:00", utc(2024, 1, 2, 12, 0)),
            ("2024-01-02T12:00", utc(2024, 1, 2, 12, 0)),
            ("2024-01-02 12:00:00", utc(2024, 1, 2, 12, 0)),
            ("2024-01-02 12:00", utc(2024, 1, 2, 12, 0)),
            ("2024-01-02", utc(2024, 1, 2, 0, 0)),
            (" 2024-01-02T12:00:00Z ", utc(2024, 1, 2, 12, 0)),
        ];

        for (datestr, expected) in valid_dates {
            assert_eq!(parse_event_date(datestr), Ok(expected), "{}", datestr);
        }
    }

    #[test]
    fn it_rejects_invalid_dates() {
        let invalid_dates = vec![
            "",
            "tomorrow",
            "2024-13-01",
            "2024-02-30",
            "2024-01-02T25:00:00Z",
            "02/01/2024",
            "2024-01-02T12:00+25:00",
            "1704153600000",
        ];

        for datestr in invalid_dates {
            assert_eq!(
                parse_event_date(datestr),
                Err(InvalidEventDate(datestr.to_string())),
                "{}",
                datestr
            );
        }
    }
}
