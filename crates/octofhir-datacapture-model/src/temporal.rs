//! FHIR temporal primitives
//!
//! FHIR `date`, `dateTime` and `time` values may be partial: a date can stop at
//! the year or month, a dateTime can omit its time part. The types here keep
//! that precision, render back to the FHIR lexical form, and only order values
//! when the order is determined.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use octofhir_datacapture_diagnostics::{DC0003, DC0004, DC0005, DataCaptureError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Precision for temporal values
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateTimePrecision {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    /// Fractional seconds
    Fraction,
}

impl fmt::Display for DateTimePrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year => write!(f, "year"),
            Self::Month => write!(f, "month"),
            Self::Day => write!(f, "day"),
            Self::Hour => write!(f, "hour"),
            Self::Minute => write!(f, "minute"),
            Self::Second => write!(f, "second"),
            Self::Fraction => write!(f, "fraction"),
        }
    }
}

/// Helper function to get the number of days in a month
fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Parse a fixed-width run of ASCII digits
fn parse_digits<T: FromStr>(s: &str, width: usize) -> Option<T> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Fractional second digits as nanoseconds (digits beyond nine are dropped)
fn fraction_nanos(fraction: &str) -> u32 {
    let mut digits: String = fraction.chars().take(9).collect();
    while digits.len() < 9 {
        digits.push('0');
    }
    digits.parse().unwrap_or(0)
}

// ============================================================================
// Date
// ============================================================================

/// FHIR `date` with precision
///
/// Represents a date with varying precision (year, month, or day).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FhirDate {
    /// Year component (required)
    pub year: i32,
    /// Month component (1-12, optional)
    pub month: Option<u8>,
    /// Day component (1-31, optional)
    pub day: Option<u8>,
}

impl FhirDate {
    /// Create a new date with full precision
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            month: Some(month),
            day: Some(day),
        }
    }

    /// Create a year-only date
    pub fn year_only(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
        }
    }

    /// Create a year-month date
    pub fn year_month(year: i32, month: u8) -> Self {
        Self {
            year,
            month: Some(month),
            day: None,
        }
    }

    /// Get the precision of this date
    pub fn precision(&self) -> DateTimePrecision {
        match (&self.month, &self.day) {
            (None, _) => DateTimePrecision::Year,
            (Some(_), None) => DateTimePrecision::Month,
            (Some(_), Some(_)) => DateTimePrecision::Day,
        }
    }

    /// Convert to chrono NaiveDate (if fully precise)
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        match (self.month, self.day) {
            (Some(month), Some(day)) => NaiveDate::from_ymd_opt(self.year, month as u32, day as u32),
            _ => None,
        }
    }

    /// Parse from the FHIR lexical form `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split('-');
        let year = parse_digits::<i32>(parts.next()?, 4)?;

        let month = match parts.next() {
            None => return Some(Self::year_only(year)),
            Some(m) => parse_digits::<u8>(m, 2).filter(|m| (1..=12).contains(m))?,
        };

        let day = match parts.next() {
            None => return Some(Self::year_month(year, month)),
            Some(d) => parse_digits::<u8>(d, 2)?,
        };

        if parts.next().is_some() || day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self::new(year, month, day))
    }
}

impl From<NaiveDate> for FhirDate {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month() as u8, date.day() as u8)
    }
}

impl FromStr for FhirDate {
    type Err = DataCaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DataCaptureError::model(DC0003, format!("Invalid date '{s}'")))
    }
}

impl TryFrom<String> for FhirDate {
    type Error = DataCaptureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FhirDate> for String {
    fn from(date: FhirDate) -> Self {
        date.to_string()
    }
}

impl fmt::Display for FhirDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.year)?;
        if let Some(month) = self.month {
            write!(f, "-{:02}", month)?;
            if let Some(day) = self.day {
                write!(f, "-{:02}", day)?;
            }
        }
        Ok(())
    }
}

impl PartialOrd for FhirDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // Compare at the lowest common precision
        let cmp_year = self.year.cmp(&other.year);
        if cmp_year != Ordering::Equal {
            return Some(cmp_year);
        }

        match (self.month, other.month) {
            (None, None) => Some(Ordering::Equal),
            (None, Some(_)) | (Some(_), None) => None,
            (Some(m1), Some(m2)) => {
                let cmp_month = m1.cmp(&m2);
                if cmp_month != Ordering::Equal {
                    return Some(cmp_month);
                }

                match (self.day, other.day) {
                    (None, None) => Some(Ordering::Equal),
                    (None, Some(_)) | (Some(_), None) => None,
                    (Some(d1), Some(d2)) => Some(d1.cmp(&d2)),
                }
            }
        }
    }
}

// ============================================================================
// Time
// ============================================================================

/// FHIR `time` with precision
///
/// Fractional seconds are kept as their digit string so the value renders
/// exactly as it was captured.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FhirTime {
    /// Hour component (0-23, required)
    pub hour: u8,
    /// Minute component (0-59, optional)
    pub minute: Option<u8>,
    /// Second component (0-59, optional)
    pub second: Option<u8>,
    /// Fractional second digits (optional, requires seconds)
    pub fraction: Option<String>,
}

impl FhirTime {
    /// Create a time with second precision
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute: Some(minute),
            second: Some(second),
            fraction: None,
        }
    }

    /// Create an hour-minute time
    pub fn hour_minute(hour: u8, minute: u8) -> Self {
        Self {
            hour,
            minute: Some(minute),
            second: None,
            fraction: None,
        }
    }

    /// Set fractional second digits
    pub fn with_fraction(mut self, digits: impl Into<String>) -> Self {
        self.fraction = Some(digits.into());
        self
    }

    /// Get the precision of this time
    pub fn precision(&self) -> DateTimePrecision {
        match (self.minute, self.second, &self.fraction) {
            (None, _, _) => DateTimePrecision::Hour,
            (Some(_), None, _) => DateTimePrecision::Minute,
            (Some(_), Some(_), None) => DateTimePrecision::Second,
            (Some(_), Some(_), Some(_)) => DateTimePrecision::Fraction,
        }
    }

    /// Convert to chrono NaiveTime (requires at least minute precision)
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        let minute = self.minute?;
        let nanos = self.fraction.as_deref().map(fraction_nanos).unwrap_or(0);
        NaiveTime::from_hms_nano_opt(
            self.hour as u32,
            minute as u32,
            self.second.unwrap_or(0) as u32,
            nanos,
        )
    }

    /// Parse from the FHIR lexical form `hh[:mm[:ss[.fff]]]`
    pub fn parse(s: &str) -> Option<Self> {
        let (main, fraction) = match s.split_once('.') {
            Some((main, digits)) => {
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                (main, Some(digits.to_string()))
            }
            None => (s, None),
        };

        let mut parts = main.split(':');
        let hour = parse_digits::<u8>(parts.next()?, 2).filter(|h| *h < 24)?;
        let minute = match parts.next() {
            None => None,
            Some(m) => Some(parse_digits::<u8>(m, 2).filter(|m| *m < 60)?),
        };
        let second = match parts.next() {
            None => None,
            Some(sec) => Some(parse_digits::<u8>(sec, 2).filter(|sec| *sec < 60)?),
        };

        if parts.next().is_some() || (fraction.is_some() && second.is_none()) {
            return None;
        }

        Some(Self {
            hour,
            minute,
            second,
            fraction,
        })
    }
}

impl From<NaiveTime> for FhirTime {
    fn from(time: NaiveTime) -> Self {
        use chrono::Timelike;
        Self::new(time.hour() as u8, time.minute() as u8, time.second() as u8)
    }
}

impl FromStr for FhirTime {
    type Err = DataCaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DataCaptureError::model(DC0005, format!("Invalid time '{s}'")))
    }
}

impl TryFrom<String> for FhirTime {
    type Error = DataCaptureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FhirTime> for String {
    fn from(time: FhirTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for FhirTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.hour)?;
        if let Some(minute) = self.minute {
            write!(f, ":{:02}", minute)?;
            if let Some(second) = self.second {
                write!(f, ":{:02}", second)?;
                if let Some(fraction) = &self.fraction {
                    write!(f, ".{}", fraction)?;
                }
            }
        }
        Ok(())
    }
}

impl PartialOrd for FhirTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let cmp_hour = self.hour.cmp(&other.hour);
        if cmp_hour != Ordering::Equal {
            return Some(cmp_hour);
        }

        match (self.minute, other.minute) {
            (None, None) => Some(Ordering::Equal),
            (None, Some(_)) | (Some(_), None) => None,
            (Some(m1), Some(m2)) => {
                let cmp_minute = m1.cmp(&m2);
                if cmp_minute != Ordering::Equal {
                    return Some(cmp_minute);
                }

                match (self.second, other.second) {
                    (None, None) => Some(Ordering::Equal),
                    (None, Some(_)) | (Some(_), None) => None,
                    (Some(s1), Some(s2)) => {
                        let cmp_second = s1.cmp(&s2);
                        if cmp_second != Ordering::Equal {
                            return Some(cmp_second);
                        }
                        let n1 = self.fraction.as_deref().map(fraction_nanos).unwrap_or(0);
                        let n2 = other.fraction.as_deref().map(fraction_nanos).unwrap_or(0);
                        Some(n1.cmp(&n2))
                    }
                }
            }
        }
    }
}

// ============================================================================
// DateTime
// ============================================================================

/// Timezone designator of a dateTime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeZoneOffset {
    /// Written as `Z`
    Utc,
    /// Offset from UTC in minutes, written as `+hh:mm` / `-hh:mm`
    Minutes(i16),
}

impl TimeZoneOffset {
    /// Offset from UTC in seconds
    pub fn seconds(&self) -> i32 {
        match self {
            Self::Utc => 0,
            Self::Minutes(minutes) => *minutes as i32 * 60,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        if s == "Z" {
            return Some(Self::Utc);
        }
        let (sign, rest) = match s.split_at_checked(1)? {
            ("+", rest) => (1i16, rest),
            ("-", rest) => (-1i16, rest),
            _ => return None,
        };
        let (hours, minutes) = rest.split_once(':')?;
        let hours = parse_digits::<i16>(hours, 2).filter(|h| *h <= 14)?;
        let minutes = parse_digits::<i16>(minutes, 2).filter(|m| *m < 60)?;
        Some(Self::Minutes(sign * (hours * 60 + minutes)))
    }
}

impl fmt::Display for TimeZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => write!(f, "Z"),
            Self::Minutes(offset) => {
                let sign = if *offset >= 0 { '+' } else { '-' };
                write!(f, "{}{:02}:{:02}", sign, offset.abs() / 60, offset.abs() % 60)
            }
        }
    }
}

/// FHIR `dateTime` with precision and timezone
///
/// A time part is only allowed after a full date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FhirDateTime {
    /// Date part
    pub date: FhirDate,
    /// Time part (optional, requires day precision)
    pub time: Option<FhirTime>,
    /// Timezone (only meaningful with a time part)
    pub timezone: Option<TimeZoneOffset>,
}

impl FhirDateTime {
    /// Create a date-only dateTime
    pub fn from_date(date: FhirDate) -> Self {
        Self {
            date,
            time: None,
            timezone: None,
        }
    }

    /// Create a dateTime with a time part and optional timezone
    pub fn new(date: FhirDate, time: FhirTime, timezone: Option<TimeZoneOffset>) -> Self {
        Self {
            date,
            time: Some(time),
            timezone,
        }
    }

    /// Get the precision of this dateTime
    pub fn precision(&self) -> DateTimePrecision {
        match &self.time {
            Some(time) => time.precision(),
            None => self.date.precision(),
        }
    }

    /// Local date and time, ignoring the timezone
    pub fn to_naive_date_time(&self) -> Option<NaiveDateTime> {
        let date = self.date.to_naive_date()?;
        let time = self.time.as_ref()?.to_naive_time()?;
        Some(NaiveDateTime::new(date, time))
    }

    /// Instant in time (requires a time part and a timezone)
    pub fn to_fixed_offset(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.timezone?.seconds())?;
        offset.from_local_datetime(&self.to_naive_date_time()?).single()
    }

    /// Parse from the FHIR lexical form
    /// `YYYY[-MM[-DD[Thh:mm[:ss[.fff]][Z|(+|-)hh:mm]]]]`
    pub fn parse(s: &str) -> Option<Self> {
        let Some((date, rest)) = s.split_once('T') else {
            return FhirDate::parse(s).map(Self::from_date);
        };

        let date = FhirDate::parse(date)?;
        if date.precision() != DateTimePrecision::Day {
            return None;
        }

        let (time, timezone) = match rest.find(&['Z', '+', '-'][..]) {
            Some(idx) => (&rest[..idx], Some(TimeZoneOffset::parse(&rest[idx..])?)),
            None => (rest, None),
        };

        let time = FhirTime::parse(time)?;
        if time.minute.is_none() {
            return None;
        }

        Some(Self::new(date, time, timezone))
    }
}

impl From<FhirDate> for FhirDateTime {
    fn from(date: FhirDate) -> Self {
        Self::from_date(date)
    }
}

impl FromStr for FhirDateTime {
    type Err = DataCaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| DataCaptureError::model(DC0004, format!("Invalid dateTime '{s}'")))
    }
}

impl TryFrom<String> for FhirDateTime {
    type Error = DataCaptureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FhirDateTime> for String {
    fn from(date_time: FhirDateTime) -> Self {
        date_time.to_string()
    }
}

impl fmt::Display for FhirDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)?;
        if let Some(time) = &self.time {
            write!(f, "T{}", time)?;
            if let Some(timezone) = &self.timezone {
                write!(f, "{}", timezone)?;
            }
        }
        Ok(())
    }
}

impl PartialOrd for FhirDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (&self.time, &other.time) {
            (None, None) => self.date.partial_cmp(&other.date),
            (Some(_), Some(_)) => match (self.to_fixed_offset(), other.to_fixed_offset()) {
                (Some(a), Some(b)) => Some(a.cmp(&b)),
                _ if self.timezone.is_none() && other.timezone.is_none() => {
                    Some(self.to_naive_date_time()?.cmp(&other.to_naive_date_time()?))
                }
                _ => None,
            },
            // Different precision: only a differing date decides
            _ => match self.date.partial_cmp(&other.date) {
                Some(Ordering::Equal) => None,
                ordering => ordering,
            },
        }
    }
}
