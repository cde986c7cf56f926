use crate::error::ChronosError;
use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Color tags offered by the client. Stored values are opaque; anything
/// outside this list is kept as given.
pub const PALETTE: [&str; 6] = ["blue", "emerald", "violet", "amber", "rose", "indigo"];

pub const DEFAULT_COLOR: &str = PALETTE[0];

pub const DEFAULT_CATEGORY: &str = "General";

// ---------------------------------------------------------------------------
// DayOfWeek
// ---------------------------------------------------------------------------

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Day of the week, 0-6 with Sunday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const SUNDAY: DayOfWeek = DayOfWeek(0);
    pub const MONDAY: DayOfWeek = DayOfWeek(1);
    pub const TUESDAY: DayOfWeek = DayOfWeek(2);
    pub const WEDNESDAY: DayOfWeek = DayOfWeek(3);
    pub const THURSDAY: DayOfWeek = DayOfWeek(4);
    pub const FRIDAY: DayOfWeek = DayOfWeek(5);
    pub const SATURDAY: DayOfWeek = DayOfWeek(6);

    pub fn new(value: u8) -> Result<Self, ChronosError> {
        if value < 7 {
            Ok(Self(value))
        } else {
            Err(ChronosError::InvalidDay(value.to_string()))
        }
    }

    pub fn all() -> impl Iterator<Item = DayOfWeek> {
        (0..7).map(DayOfWeek)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn next(self) -> DayOfWeek {
        DayOfWeek((self.0 + 1) % 7)
    }

    pub fn previous(self) -> DayOfWeek {
        DayOfWeek((self.0 + 6) % 7)
    }

    pub fn name(self) -> &'static str {
        DAY_NAMES[self.0 as usize]
    }

    pub fn short_name(self) -> &'static str {
        &DAY_NAMES[self.0 as usize][..3]
    }

    /// Today's day of week on the local wall clock.
    pub fn today() -> DayOfWeek {
        Moment::now().day
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = ChronosError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DayOfWeek::new(value)
    }
}

impl TryFrom<i64> for DayOfWeek {
    type Error = ChronosError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| ChronosError::InvalidDay(value.to_string()))
            .and_then(DayOfWeek::new)
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> u8 {
        day.0
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DayOfWeek {
    type Err = ChronosError;

    /// Accepts `0`-`6`, a full English day name or its three-letter prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u8>() {
            return DayOfWeek::new(n).map_err(|_| ChronosError::InvalidDay(s.to_string()));
        }
        let lower = trimmed.to_ascii_lowercase();
        DayOfWeek::all()
            .find(|d| {
                let name = d.name().to_ascii_lowercase();
                lower == name || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| ChronosError::InvalidDay(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ClockTime
// ---------------------------------------------------------------------------

static CLOCK_RE: OnceLock<Regex> = OnceLock::new();

fn clock_re() -> &'static Regex {
    CLOCK_RE.get_or_init(|| Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").unwrap())
}

/// Wall-clock time of day as zero-padded 24-hour `HH:mm`.
///
/// Ordering is by minute of day, which agrees with the lexicographic order
/// of the canonical string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ChronosError> {
        if hour > 23 || minute > 59 {
            return Err(ChronosError::InvalidTime(format!("{hour}:{minute}")));
        }
        Ok(Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    /// Caller guarantees `hour < 24` and `minute < 60`.
    pub(crate) const fn from_parts(hour: u8, minute: u8) -> Self {
        Self {
            minutes: hour as u16 * 60 + minute as u16,
        }
    }

    pub fn hour(self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.minutes % 60) as u8
    }

    pub fn minute_of_day(self) -> u16 {
        self.minutes
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl std::str::FromStr for ClockTime {
    type Err = ChronosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = clock_re()
            .captures(s)
            .ok_or_else(|| ChronosError::InvalidTime(s.to_string()))?;
        let hour: u8 = caps[1]
            .parse()
            .map_err(|_| ChronosError::InvalidTime(s.to_string()))?;
        let minute: u8 = caps[2]
            .parse()
            .map_err(|_| ChronosError::InvalidTime(s.to_string()))?;
        ClockTime::new(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ChronosError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> String {
        t.to_string()
    }
}

// ---------------------------------------------------------------------------
// Moment
// ---------------------------------------------------------------------------

/// The "current moment" an activity's status is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moment {
    pub day: DayOfWeek,
    pub time: ClockTime,
}

impl Moment {
    pub fn new(day: DayOfWeek, time: ClockTime) -> Self {
        Self { day, time }
    }

    /// Local wall-clock moment, truncated to the minute.
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        let day = DayOfWeek(dt.weekday().num_days_from_sunday() as u8);
        let time = ClockTime {
            minutes: (dt.hour() * 60 + dt.minute()) as u16,
        };
        Self { day, time }
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.time)
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Past,
    Now,
    Future,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Past => "past",
            Status::Now => "now",
            Status::Future => "future",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = ChronosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "past" => Ok(Status::Past),
            "now" => Ok(Status::Now),
            "future" => Ok(Status::Future),
            _ => Err(ChronosError::InvalidStatus(s.to_string())),
        }
    }
}
