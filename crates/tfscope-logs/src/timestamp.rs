use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::sanitize::PLACEHOLDER;

/// Zone used when rendering timestamps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeZoneMode {
    #[default]
    Utc,
    Local,
}

impl TimeZoneMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Utc => Self::Local,
            Self::Local => Self::Utc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Utc => "UTC",
            Self::Local => "local",
        }
    }
}

/// Offset-carrying formats besides RFC 3339 (Terraform writes `+0300`)
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Formats without an offset, read as UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a backend timestamp into UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(raw, format) {
            return Some(ts.with_timezone(&Utc));
        }
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Render a raw timestamp as `HH:MM:SS.mmm`
///
/// Empty input yields the placeholder; anything unparseable is returned unchanged.
pub fn format_timestamp(raw: Option<&str>, zone: TimeZoneMode) -> String {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return PLACEHOLDER.to_string(),
    };

    match parse_timestamp(raw) {
        Some(ts) => match zone {
            TimeZoneMode::Utc => ts.format("%H:%M:%S%.3f").to_string(),
            TimeZoneMode::Local => ts.with_timezone(&Local).format("%H:%M:%S%.3f").to_string(),
        },
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024-01-15T10:30:00.500Z", "10:30:00.500")]
    #[case("2024-01-15T10:30:00Z", "10:30:00.000")]
    #[case("2024-01-15T13:30:00.250+03:00", "10:30:00.250")]
    #[case("2024-01-15T13:30:00.250+0300", "10:30:00.250")]
    #[case("2024-01-15T10:30:00.123456", "10:30:00.123")]
    #[case("2024-01-15 09:05:07", "09:05:07.000")]
    fn test_format_utc(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_timestamp(Some(raw), TimeZoneMode::Utc), expected);
    }

    #[rstest]
    #[case("not-a-date")]
    #[case("10:30")]
    #[case("2024-13-45T99:99:99Z")]
    fn test_unparseable_returned_unchanged(#[case] raw: &str) {
        assert_eq!(format_timestamp(Some(raw), TimeZoneMode::Utc), raw);
    }

    #[test]
    fn test_empty_is_placeholder() {
        assert_eq!(format_timestamp(None, TimeZoneMode::Utc), "-");
        assert_eq!(format_timestamp(Some(""), TimeZoneMode::Local), "-");
    }

    #[test]
    fn test_local_mode_keeps_fixed_width() {
        let out = format_timestamp(Some("2024-01-15T10:30:00.500Z"), TimeZoneMode::Local);
        assert_eq!(out.len(), "HH:MM:SS.mmm".len());
        assert!(out.ends_with(".500"));
    }
}
