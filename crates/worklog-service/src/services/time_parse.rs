//! Default time parser - interprets user-entered durations and timestamps

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use worklog_core::{TimeParser, User};

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;
/// One workday is counted as eight hours
const SECONDS_PER_DAY: f64 = 8.0 * SECONDS_PER_HOUR;
/// One workweek is counted as five workdays
const SECONDS_PER_WEEK: f64 = 5.0 * SECONDS_PER_DAY;

/// Duration/timestamp parser matching what users type into time-entry
/// forms: clock-style `"1:30"`, unit-suffixed `"2h 30m"`, or a bare
/// minute count.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTimeParser;

impl DefaultTimeParser {
    /// Parse `H:MM` or `H:MM:SS` clock notation into seconds
    fn parse_clock(raw: &str) -> Option<i64> {
        let mut parts = raw.split(':');
        let hours: i64 = parts.next()?.trim().parse().ok()?;
        let minutes: i64 = parts.next()?.trim().parse().ok()?;
        if minutes >= 60 {
            return None;
        }
        let seconds: i64 = match parts.next() {
            Some(s) => {
                let s: i64 = s.trim().parse().ok()?;
                if s >= 60 {
                    return None;
                }
                s
            }
            None => 0,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(hours * 3600 + minutes * 60 + seconds)
    }

    /// Parse unit-suffixed notation (`"2h 30m"`, `"1.5d"`, `"45"`).
    /// A number without a unit counts as minutes.
    fn parse_units(raw: &str) -> Option<i64> {
        let mut total = 0.0_f64;
        let mut chars = raw.chars().peekable();
        let mut saw_number = false;

        while chars.peek().is_some() {
            while chars.peek().is_some_and(|c| c.is_whitespace() || *c == ',') {
                chars.next();
            }
            if chars.peek().is_none() {
                break;
            }

            let mut number = String::new();
            while let Some(&c) = chars.peek() {
                if !c.is_ascii_digit() && c != '.' {
                    break;
                }
                number.push(c);
                chars.next();
            }
            if number.is_empty() {
                return None;
            }
            let value: f64 = number.parse().ok()?;
            saw_number = true;

            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }

            let multiplier = match chars.peek().copied() {
                Some('w' | 'W') => {
                    chars.next();
                    SECONDS_PER_WEEK
                }
                Some('d' | 'D') => {
                    chars.next();
                    SECONDS_PER_DAY
                }
                Some('h' | 'H') => {
                    chars.next();
                    SECONDS_PER_HOUR
                }
                Some('m' | 'M') => {
                    chars.next();
                    SECONDS_PER_MINUTE
                }
                Some('s' | 'S') => {
                    chars.next();
                    1.0
                }
                Some(_) => return None,
                None => SECONDS_PER_MINUTE,
            };
            total += value * multiplier;
        }

        if saw_number {
            Some(total.round() as i64)
        } else {
            None
        }
    }

    /// Parse a local timestamp string in one of the accepted formats
    fn parse_local(raw: &str) -> Option<NaiveDateTime> {
        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(parsed);
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}

impl TimeParser for DefaultTimeParser {
    fn parse_duration(&self, _user: &User, raw: &str) -> Option<i64> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.contains(':') {
            return Self::parse_clock(raw);
        }
        Self::parse_units(raw)
    }

    fn parse_started_at(&self, user: &User, raw: Option<&str>) -> DateTime<Utc> {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Utc::now();
        };

        // Absolute timestamps carry their own offset
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return parsed.with_timezone(&Utc);
        }

        let Some(local) = Self::parse_local(raw) else {
            return Utc::now();
        };
        let Some(offset) = FixedOffset::east_opt(user.utc_offset_minutes * 60) else {
            return Utc::now();
        };
        match offset.from_local_datetime(&local).single() {
            Some(instant) => instant.with_timezone(&Utc),
            None => Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worklog_core::AccessLevel;

    fn user(offset_minutes: i32) -> User {
        User {
            id: 1,
            name: "Alice".to_string(),
            company_id: 1,
            access_level: AccessLevel::PUBLIC,
            utc_offset_minutes: offset_minutes,
        }
    }

    #[test]
    fn test_clock_notation() {
        let parser = DefaultTimeParser;
        let u = user(0);
        assert_eq!(parser.parse_duration(&u, "1:30"), Some(5400));
        assert_eq!(parser.parse_duration(&u, "0:05:30"), Some(330));
        assert_eq!(parser.parse_duration(&u, "1:75"), None);
    }

    #[test]
    fn test_unit_notation() {
        let parser = DefaultTimeParser;
        let u = user(0);
        assert_eq!(parser.parse_duration(&u, "2h 30m"), Some(9000));
        assert_eq!(parser.parse_duration(&u, "1d"), Some(8 * 3600));
        assert_eq!(parser.parse_duration(&u, "1w"), Some(40 * 3600));
        assert_eq!(parser.parse_duration(&u, "0.5h"), Some(1800));
    }

    #[test]
    fn test_bare_number_is_minutes() {
        let parser = DefaultTimeParser;
        let u = user(0);
        assert_eq!(parser.parse_duration(&u, "45"), Some(2700));
    }

    #[test]
    fn test_garbage_is_none() {
        let parser = DefaultTimeParser;
        let u = user(0);
        assert_eq!(parser.parse_duration(&u, "soon"), None);
        assert_eq!(parser.parse_duration(&u, ""), None);
        assert_eq!(parser.parse_duration(&u, "  "), None);
    }

    #[test]
    fn test_started_at_applies_user_offset() {
        let parser = DefaultTimeParser;
        let u = user(120);
        let parsed = parser.parse_started_at(&u, Some("2026-08-20 10:00"));
        assert_eq!(parsed.to_rfc3339(), "2026-08-20T08:00:00+00:00");
    }

    #[test]
    fn test_started_at_defaults_to_now() {
        let parser = DefaultTimeParser;
        let u = user(0);
        let before = Utc::now();
        let parsed = parser.parse_started_at(&u, None);
        assert!(parsed >= before && parsed <= Utc::now());

        let parsed = parser.parse_started_at(&u, Some("not a date"));
        assert!(parsed >= before && parsed <= Utc::now());
    }
}
