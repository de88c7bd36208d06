//! Weekly recurring time sessions.
//!
//! A [`TimeSession`] is one weekly occurrence of a class meeting: a weekday
//! plus a time-of-day range. A section meeting on several days expands into
//! one session per day.
//!
//! # Time Model
//! Times are minutes since midnight. Ranges are half-open `[start, end)`,
//! so a 09:00–10:00 class and a 10:00–11:00 class do not conflict.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SessionError;

/// Minutes in a day. Valid only as an end time.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Zero-based index, Monday = 0.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Two-letter catalog code (`"Mo"`, `"Tu"`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Weekday::Mon => "Mo",
            Weekday::Tue => "Tu",
            Weekday::Wed => "We",
            Weekday::Thu => "Th",
            Weekday::Fri => "Fr",
            Weekday::Sat => "Sa",
            Weekday::Sun => "Su",
        }
    }
}

impl FromStr for Weekday {
    type Err = SessionError;

    /// Accepts two-letter codes, three-letter abbreviations and full
    /// names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let day = match s.trim().to_ascii_lowercase().as_str() {
            "mo" | "mon" | "monday" => Weekday::Mon,
            "tu" | "tue" | "tues" | "tuesday" => Weekday::Tue,
            "we" | "wed" | "wednesday" => Weekday::Wed,
            "th" | "thu" | "thur" | "thurs" | "thursday" => Weekday::Thu,
            "fr" | "fri" | "friday" => Weekday::Fri,
            "sa" | "sat" | "saturday" => Weekday::Sat,
            "su" | "sun" | "sunday" => Weekday::Sun,
            _ => {
                return Err(SessionError::InvalidWeekday {
                    text: s.to_string(),
                })
            }
        };
        Ok(day)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A time of day in minutes since midnight (`0..=1440`).
///
/// Serialized as an `"HH:MM"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Creates a time from hour and minute.
    pub fn hm(hour: u16, minute: u16) -> Result<Self, SessionError> {
        if minute >= 60 {
            return Err(SessionError::InvalidTime {
                text: format!("{hour}:{minute:02}"),
            });
        }
        Self::from_minutes(hour.saturating_mul(60).saturating_add(minute))
    }

    /// Creates a time from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Result<Self, SessionError> {
        if minutes > MINUTES_PER_DAY {
            return Err(SessionError::TimeOutOfRange { minutes });
        }
        Ok(Self(minutes))
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    #[inline]
    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl FromStr for TimeOfDay {
    type Err = SessionError;

    /// Parses `"HH:MM"` / `"H:MM"` (24h), optionally followed by `am`/`pm`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SessionError::InvalidTime {
            text: s.to_string(),
        };

        let lower = s.trim().to_ascii_lowercase();
        let (clock, meridiem) = if let Some(rest) = lower.strip_suffix("am") {
            (rest.trim_end(), Some(false))
        } else if let Some(rest) = lower.strip_suffix("pm") {
            (rest.trim_end(), Some(true))
        } else {
            (lower.as_str(), None)
        };

        let (h, m) = clock.split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let mut hour: u16 = h.parse().map_err(|_| invalid())?;
        let minute: u16 = m.parse().map_err(|_| invalid())?;

        match meridiem {
            Some(pm) => {
                if !(1..=12).contains(&hour) {
                    return Err(invalid());
                }
                hour %= 12;
                if pm {
                    hour += 12;
                }
            }
            None => {
                // 24:00 is the only hour-24 value, and only as an end bound
                if hour > 24 || (hour == 24 && minute != 0) {
                    return Err(invalid());
                }
            }
        }

        TimeOfDay::hm(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = SessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// One weekly recurring class meeting.
///
/// Immutable once constructed; `start < end` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SessionRepr")]
pub struct TimeSession {
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
    kind: String,
}

#[derive(Deserialize)]
struct SessionRepr {
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
    #[serde(default)]
    kind: String,
}

impl TryFrom<SessionRepr> for TimeSession {
    type Error = SessionError;

    fn try_from(r: SessionRepr) -> Result<Self, Self::Error> {
        TimeSession::new(r.day, r.start, r.end, r.kind)
    }
}

impl TimeSession {
    /// Creates a session, rejecting empty or inverted ranges.
    pub fn new(
        day: Weekday,
        start: TimeOfDay,
        end: TimeOfDay,
        kind: impl Into<String>,
    ) -> Result<Self, SessionError> {
        if start >= end {
            return Err(SessionError::EmptyRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            day,
            start,
            end,
            kind: kind.into(),
        })
    }

    /// Convenience constructor from `"HH:MM"` strings.
    pub fn parse(day: Weekday, start: &str, end: &str, kind: impl Into<String>) -> Result<Self, SessionError> {
        Self::new(day, start.parse()?, end.parse()?, kind)
    }

    #[inline]
    pub fn day(&self) -> Weekday {
        self.day
    }

    #[inline]
    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    #[inline]
    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Display label (e.g. "lecture", "lab"). Not used for comparison logic.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Length in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    /// Whether two sessions conflict: same day and intersecting `[start, end)`.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end)
    }
}

/// Whether two sessions conflict. See [`TimeSession::overlaps`].
#[inline]
pub fn overlaps(a: &TimeSession, b: &TimeSession) -> bool {
    a.overlaps(b)
}

/// Whether any session of `a` overlaps any session of `b`.
pub fn any_overlap<'a, 'b, A, B>(a: A, b: B) -> bool
where
    A: IntoIterator<Item = &'a TimeSession>,
    B: IntoIterator<Item = &'b TimeSession>,
    B::IntoIter: Clone,
{
    let b = b.into_iter();
    a.into_iter().any(|x| b.clone().any(|y| x.overlaps(y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(day: Weekday, start: &str, end: &str) -> TimeSession {
        TimeSession::parse(day, start, end, "lecture").unwrap()
    }

    #[test]
    fn test_time_of_day_parse() {
        assert_eq!("09:30".parse::<TimeOfDay>().unwrap().minutes(), 570);
        assert_eq!("9:30".parse::<TimeOfDay>().unwrap().minutes(), 570);
        assert_eq!("00:00".parse::<TimeOfDay>().unwrap().minutes(), 0);
        assert_eq!("24:00".parse::<TimeOfDay>().unwrap().minutes(), 1440);
        assert_eq!("1:15pm".parse::<TimeOfDay>().unwrap().to_string(), "13:15");
        assert_eq!("12:00 AM".parse::<TimeOfDay>().unwrap().minutes(), 0);
        assert_eq!("12:30pm".parse::<TimeOfDay>().unwrap().to_string(), "12:30");
    }

    #[test]
    fn test_time_of_day_rejects_garbage() {
        for bad in ["", "930", "9:3", "25:00", "24:30", "09:60", "ab:cd", "13:00pm", "-1:00"] {
            assert!(bad.parse::<TimeOfDay>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_weekday_parse() {
        assert_eq!("Mo".parse::<Weekday>().unwrap(), Weekday::Mon);
        assert_eq!("thursday".parse::<Weekday>().unwrap(), Weekday::Thu);
        assert_eq!(" SAT ".parse::<Weekday>().unwrap(), Weekday::Sat);
        assert!("Xx".parse::<Weekday>().is_err());
        assert_eq!(Weekday::Fri.to_string(), "Fr");
    }

    #[test]
    fn test_session_requires_start_before_end() {
        assert!(TimeSession::parse(Weekday::Mon, "10:00", "10:00", "").is_err());
        assert!(TimeSession::parse(Weekday::Mon, "11:00", "10:00", "").is_err());
        assert_eq!(s(Weekday::Mon, "09:00", "10:15").duration_minutes(), 75);
    }

    #[test]
    fn test_overlap_half_open_boundary() {
        let a = s(Weekday::Mon, "09:00", "10:00");
        let b = s(Weekday::Mon, "10:00", "11:00");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_overlap_partial_and_containment() {
        let a = s(Weekday::Mon, "09:00", "10:00");
        let b = s(Weekday::Mon, "09:30", "10:30");
        let c = s(Weekday::Mon, "08:00", "12:00");
        assert!(a.overlaps(&b));
        assert!(c.overlaps(&a));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_overlap_reflexive() {
        let a = s(Weekday::Wed, "13:00", "14:00");
        assert!(overlaps(&a, &a));
    }

    #[test]
    fn test_different_days_never_overlap() {
        let a = s(Weekday::Mon, "09:00", "10:00");
        let b = s(Weekday::Tue, "09:00", "10:00");
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_overlap_symmetric_exhaustive() {
        // Every pair of 30-minute-grid sessions over two days
        let mut all = Vec::new();
        for day in [Weekday::Mon, Weekday::Tue] {
            for start in (0..8u16).map(|i| 480 + i * 30) {
                for len in [30u16, 60, 90] {
                    let st = TimeOfDay::from_minutes(start).unwrap();
                    let en = TimeOfDay::from_minutes(start + len).unwrap();
                    all.push(TimeSession::new(day, st, en, "").unwrap());
                }
            }
        }
        for a in &all {
            for b in &all {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_any_overlap() {
        let xs = [s(Weekday::Mon, "09:00", "10:00"), s(Weekday::Wed, "09:00", "10:00")];
        let ys = [s(Weekday::Tue, "09:00", "10:00"), s(Weekday::Wed, "09:45", "11:00")];
        let zs = [s(Weekday::Fri, "09:00", "10:00")];
        assert!(any_overlap(&xs, &ys));
        assert!(!any_overlap(&xs, &zs));
        let none: [TimeSession; 0] = [];
        assert!(!any_overlap(&xs, &none));
    }

    #[test]
    fn test_session_serde() {
        let a = s(Weekday::Thu, "14:00", "15:50");
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"14:00\""));
        let back: TimeSession = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);

        let inverted = r#"{"day":"Mon","start":"10:00","end":"09:00"}"#;
        assert!(serde_json::from_str::<TimeSession>(inverted).is_err());
    }
}
