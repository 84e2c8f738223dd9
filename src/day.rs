//! Calendar-day keys.
//!
//! Every date that enters or leaves the store goes through [`DayKey`]. A day
//! is a UTC calendar day; timestamps carrying an offset are shifted to UTC
//! before the date is taken, so the same instant always lands on the same key.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DayKeyError {
    #[error("Invalid date: {0:?}")]
    Invalid(String),

    #[error("Date out of range: {0}")]
    OutOfRange(i64),

    #[error("Date {0} is outside the supported years {MIN_YEAR}-{MAX_YEAR}")]
    Unsupported(NaiveDate),
}

/// Years a day key may be built from. Keeps day arithmetic and the
/// `TIMESTAMPTZ` column well inside their representable ranges.
pub const MIN_YEAR: i32 = 1970;
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "DateInput")]
pub struct DayKey(NaiveDate);

/// Raw JSON shapes accepted for a date: text or epoch milliseconds.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DateInput {
    Text(String),
    Millis(i64),
}

impl TryFrom<DateInput> for DayKey {
    type Error = DayKeyError;

    fn try_from(value: DateInput) -> Result<Self, Self::Error> {
        match value {
            DateInput::Text(text) => DayKey::parse(&text),
            DateInput::Millis(ms) => DayKey::from_millis(ms),
        }
    }
}

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn today() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.date_naive())
    }

    pub fn from_millis(ms: i64) -> Result<Self, DayKeyError> {
        let at = Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or(DayKeyError::OutOfRange(ms))?;
        Self::supported(at.date_naive())
    }

    /// Like [`DayKey::new`], but rejects dates outside `MIN_YEAR..=MAX_YEAR`.
    pub fn supported(date: NaiveDate) -> Result<Self, DayKeyError> {
        if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            Ok(Self(date))
        } else {
            Err(DayKeyError::Unsupported(date))
        }
    }

    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive ISO timestamps
    /// (read as UTC). Epoch milliseconds only arrive as JSON numbers.
    pub fn parse(input: &str) -> Result<Self, DayKeyError> {
        let trimmed = input.trim();

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Self::supported(date);
        }
        if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::supported(at.with_timezone(&Utc).date_naive());
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Self::supported(naive.date());
            }
        }

        Err(DayKeyError::Invalid(input.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// UTC midnight at the start of this day. This is the stored `date`.
    pub fn start_of_day(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    /// Half-open interval `[start, start + 24h)` covering this day. On the
    /// last representable day the end is clamped to `DateTime::MAX_UTC`.
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.start_of_day();
        let end = start
            .checked_add_signed(Duration::days(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        (start, end)
    }

    /// The day before, or `None` at `NaiveDate::MIN`.
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The day after, or `None` at `NaiveDate::MAX`.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DayKey {
    type Err = DayKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
