use thiserror::Error;
use time::OffsetDateTime;

/// Heartopia runs three hours ahead of PST, which puts it at UTC-5.
pub const DEFAULT_OFFSET_MINUTES: i32 = -300;

pub const MINUTES_PER_DAY: i32 = 1440;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockParseError {
    #[error("empty clock string")]
    Empty,
    #[error("unrecognized clock string {0:?}")]
    Unrecognized(String),
}

/// Maps real UTC wall-clock time onto the in-game clock.
#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    offset_minutes: i32,
}

impl GameClock {
    pub fn new(offset_minutes: i32) -> Self {
        Self { offset_minutes }
    }

    pub fn minutes_now(&self) -> u16 {
        self.minutes_at(OffsetDateTime::now_utc())
    }

    pub fn minutes_at(&self, utc: OffsetDateTime) -> u16 {
        let utc_minutes = i32::from(utc.hour()) * 60 + i32::from(utc.minute());
        (utc_minutes + self.offset_minutes).rem_euclid(MINUTES_PER_DAY) as u16
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(DEFAULT_OFFSET_MINUTES)
    }
}

/// Renders minutes-of-day as a 12-hour clock, e.g. `1:05 PM`. Hour zero
/// displays as 12.
pub fn format_minutes(minutes: u16) -> String {
    let minutes = minutes % MINUTES_PER_DAY as u16;
    let hour = minutes / 60;
    let minute = minutes % 60;
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let mut display_hour = hour % 12;
    if display_hour == 0 {
        display_hour = 12;
    }
    format!("{display_hour}:{minute:02} {suffix}")
}

/// Parses `H`, `H:MM` or `HH:MM` followed by AM/PM (case-insensitive,
/// whitespace optional) into minutes-of-day. `12 AM` is midnight, `12 PM`
/// is noon.
pub fn parse_clock(text: &str) -> Result<u16, ClockParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ClockParseError::Empty);
    }
    let lower = trimmed.to_ascii_lowercase();
    let (digits, pm) = if let Some(rest) = lower.strip_suffix("am") {
        (rest.trim_end(), false)
    } else if let Some(rest) = lower.strip_suffix("pm") {
        (rest.trim_end(), true)
    } else {
        return Err(ClockParseError::Unrecognized(trimmed.to_string()));
    };

    let (hour_part, minute_part) = match digits.split_once(':') {
        Some((hour, minute)) => (hour, Some(minute)),
        None => (digits, None),
    };

    if hour_part.is_empty() || hour_part.len() > 2 || !is_digits(hour_part) {
        return Err(ClockParseError::Unrecognized(trimmed.to_string()));
    }
    let mut hour: u16 = hour_part
        .parse()
        .map_err(|_| ClockParseError::Unrecognized(trimmed.to_string()))?;

    let minute: u16 = match minute_part {
        Some(part) => {
            if part.len() != 2 || !is_digits(part) {
                return Err(ClockParseError::Unrecognized(trimmed.to_string()));
            }
            part.parse()
                .map_err(|_| ClockParseError::Unrecognized(trimmed.to_string()))?
        }
        None => 0,
    };

    if hour > 12 || minute > 59 {
        return Err(ClockParseError::Unrecognized(trimmed.to_string()));
    }

    if pm {
        if hour != 12 {
            hour += 12;
        }
    } else if hour == 12 {
        hour = 0;
    }

    Ok(hour * 60 + minute)
}

fn is_digits(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    #[test]
    fn parse_midnight_and_noon() {
        assert_eq!(parse_clock("12 AM"), Ok(0));
        assert_eq!(parse_clock("12 PM"), Ok(720));
        assert_eq!(parse_clock("1:30 PM"), Ok(810));
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(parse_clock("  9 am "), Ok(540));
        assert_eq!(parse_clock("9PM"), Ok(1260));
        assert_eq!(parse_clock("09:05 pm"), Ok(1265));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_clock("").is_err());
        assert!(parse_clock("9").is_err());
        assert!(parse_clock("9:5 PM").is_err());
        assert!(parse_clock("25 PM").is_err());
        assert!(parse_clock("9:75 AM").is_err());
        assert!(parse_clock("noon").is_err());
    }

    #[test]
    fn format_matches_expected_strings() {
        assert_eq!(format_minutes(0), "12:00 AM");
        assert_eq!(format_minutes(810), "1:30 PM");
        assert_eq!(format_minutes(1439), "11:59 PM");
    }

    #[test]
    fn format_then_parse_round_trips_every_minute() {
        for m in 0..1440u16 {
            assert_eq!(parse_clock(&format_minutes(m)), Ok(m), "minute {m}");
        }
    }

    #[test]
    fn clock_offset_wraps_past_midnight() {
        let clock = GameClock::new(DEFAULT_OFFSET_MINUTES);
        // 02:00 UTC with a -5h offset lands at 9 PM the previous game day.
        let two_am = OffsetDateTime::UNIX_EPOCH + Duration::hours(2);
        assert_eq!(clock.minutes_at(two_am), 21 * 60);
        // Result is always in [0, 1440).
        let noon = OffsetDateTime::UNIX_EPOCH + Duration::hours(12);
        assert_eq!(clock.minutes_at(noon), 7 * 60);
    }
}
