//! Temporal values - instants, intervals, periodic and event-related timing
//!
//! CDA timestamps are precision-significant: "2019" and "2019-01-01" are
//! different statements. [`Timestamp`] therefore stores components rather
//! than a normalized instant, like a partial date, and renders the HL7 TS
//! wire literal. [`TemporalValue`] is the tagged union the statement tree
//! accepts; interval construction degrades explicitly, never silently.

use crate::{NullFlavor, PhysicalQuantity};
use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Precision of a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePrecision {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl fmt::Display for TimePrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year => write!(f, "year"),
            Self::Month => write!(f, "month"),
            Self::Day => write!(f, "day"),
            Self::Hour => write!(f, "hour"),
            Self::Minute => write!(f, "minute"),
            Self::Second => write!(f, "second"),
        }
    }
}

/// A point in time with explicit precision
///
/// Components below the stated precision are absent, not zeroed. Displays as
/// the HL7 TS literal, e.g. `20190407`, `201904071530+1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamp {
    /// Year component (required)
    pub year: i32,
    /// Month component (1-12, optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    /// Day component (1-31, optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
    /// Hour component (0-23, optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u8>,
    /// Minute component (0-59, optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<u8>,
    /// Second component (0-59, optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<u8>,
    /// Timezone offset in minutes east of UTC (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<i16>,
}

impl Timestamp {
    /// Create a year-only timestamp
    pub fn year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
            hour: None,
            minute: None,
            second: None,
            timezone_offset: None,
        }
    }

    /// Create a day-precision timestamp
    pub fn ymd(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            month: Some(month),
            day: Some(day),
            hour: None,
            minute: None,
            second: None,
            timezone_offset: None,
        }
    }

    /// Create a minute-precision timestamp
    pub fn ymd_hm(year: i32, month: u8, day: u8, hour: u8, minute: u8) -> Self {
        Self {
            year,
            month: Some(month),
            day: Some(day),
            hour: Some(hour),
            minute: Some(minute),
            second: None,
            timezone_offset: None,
        }
    }

    /// Create a second-precision timestamp from a chrono value
    pub fn from_datetime(value: chrono::DateTime<chrono::FixedOffset>) -> Self {
        Self {
            year: value.year(),
            month: Some(value.month() as u8),
            day: Some(value.day() as u8),
            hour: Some(value.hour() as u8),
            minute: Some(value.minute() as u8),
            second: Some(value.second() as u8),
            timezone_offset: Some((value.offset().local_minus_utc() / 60) as i16),
        }
    }

    /// Create a day-precision timestamp from a chrono date
    pub fn from_date(value: chrono::NaiveDate) -> Self {
        Self::ymd(value.year(), value.month() as u8, value.day() as u8)
    }

    /// Set the timezone offset in minutes east of UTC
    pub fn with_offset(mut self, minutes: i16) -> Self {
        self.timezone_offset = Some(minutes);
        self
    }

    /// Get the precision of this timestamp
    pub fn precision(&self) -> TimePrecision {
        if self.second.is_some() {
            TimePrecision::Second
        } else if self.minute.is_some() {
            TimePrecision::Minute
        } else if self.hour.is_some() {
            TimePrecision::Hour
        } else if self.day.is_some() {
            TimePrecision::Day
        } else if self.month.is_some() {
            TimePrecision::Month
        } else {
            TimePrecision::Year
        }
    }

    /// Convert to a chrono date when day precision is available
    pub fn to_naive_date(&self) -> Option<chrono::NaiveDate> {
        match (self.month, self.day) {
            (Some(month), Some(day)) => {
                chrono::NaiveDate::from_ymd_opt(self.year, month as u32, day as u32)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.year)?;
        if let Some(month) = self.month {
            write!(f, "{month:02}")?;
            if let Some(day) = self.day {
                write!(f, "{day:02}")?;
                if let Some(hour) = self.hour {
                    write!(f, "{hour:02}")?;
                    if let Some(minute) = self.minute {
                        write!(f, "{minute:02}")?;
                        if let Some(second) = self.second {
                            write!(f, "{second:02}")?;
                        }
                    }
                }
            }
        }
        if let Some(offset) = self.timezone_offset {
            let sign = if offset < 0 { '-' } else { '+' };
            let abs = offset.unsigned_abs();
            write!(f, "{sign}{:02}{:02}", abs / 60, abs % 60)?;
        }
        Ok(())
    }
}

/// Structural shape of a time interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntervalShape {
    /// Both bounds present
    Bounded,
    /// Low bound only: open-ended, started
    OpenEndedStarted,
    /// High bound only: open-ended, ended
    OpenEndedEnded,
    /// Center and width: symmetric interval
    Symmetric,
    /// Width only: duration without anchor
    WidthOnly,
    /// Nothing: carries an explicit absence marker
    Unspecified,
}

/// A time interval with optional low/high/width/center
///
/// An interval with none of the four components set is *unspecified* and
/// always carries an explicit null flavor rather than being an empty
/// structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    /// Lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Timestamp>,
    /// Upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Timestamp>,
    /// Duration of the interval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<PhysicalQuantity>,
    /// Central point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Timestamp>,
    /// Reason no structure is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_flavor: Option<NullFlavor>,
}

impl TimeInterval {
    /// Classify the structural shape
    pub fn shape(&self) -> IntervalShape {
        match (&self.low, &self.high, &self.width, &self.center) {
            (Some(_), Some(_), _, _) => IntervalShape::Bounded,
            (Some(_), None, _, _) => IntervalShape::OpenEndedStarted,
            (None, Some(_), _, _) => IntervalShape::OpenEndedEnded,
            (None, None, Some(_), Some(_)) => IntervalShape::Symmetric,
            (None, None, Some(_), None) => IntervalShape::WidthOnly,
            (None, None, None, Some(_)) => IntervalShape::Symmetric,
            (None, None, None, None) => IntervalShape::Unspecified,
        }
    }

    /// True when the interval is an explicit absence marker
    pub fn is_unspecified(&self) -> bool {
        self.shape() == IntervalShape::Unspecified
    }
}

/// Builder for [`TimeInterval`]
///
/// Degradation rules: an all-empty build yields NullFlavor::NoInformation;
/// a caller-supplied null flavor always overrides computed structure.
#[derive(Debug, Clone, Default)]
pub struct IntervalBuilder {
    low: Option<Timestamp>,
    high: Option<Timestamp>,
    width: Option<PhysicalQuantity>,
    center: Option<Timestamp>,
    null_flavor: Option<NullFlavor>,
}

impl IntervalBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lower bound
    pub fn low(mut self, value: Timestamp) -> Self {
        self.low = Some(value);
        self
    }

    /// Set the upper bound
    pub fn high(mut self, value: Timestamp) -> Self {
        self.high = Some(value);
        self
    }

    /// Set the width
    pub fn width(mut self, value: PhysicalQuantity) -> Self {
        self.width = Some(value);
        self
    }

    /// Set the center
    pub fn center(mut self, value: Timestamp) -> Self {
        self.center = Some(value);
        self
    }

    /// Supply an explicit null flavor; explicit absence beats inferred absence
    pub fn null_flavor(mut self, flavor: NullFlavor) -> Self {
        self.null_flavor = Some(flavor);
        self
    }

    /// Build the interval
    pub fn build(self) -> TimeInterval {
        if let Some(flavor) = self.null_flavor {
            // Explicit absence overrides whatever structure was supplied.
            return TimeInterval {
                low: None,
                high: None,
                width: None,
                center: None,
                null_flavor: Some(flavor),
            };
        }
        let empty = self.low.is_none()
            && self.high.is_none()
            && self.width.is_none()
            && self.center.is_none();
        TimeInterval {
            low: self.low,
            high: self.high,
            width: self.width,
            center: self.center,
            null_flavor: empty.then_some(NullFlavor::NoInformation),
        }
    }
}

/// HL7 timing event codes for event-related administration timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingEvent {
    /// Before meal
    BeforeMeal,
    /// After meal
    AfterMeal,
    /// With meal
    WithMeal,
    /// Before sleep
    BeforeSleep,
    /// Upon waking
    OnWaking,
}

impl TimingEvent {
    /// Get the wire code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BeforeMeal => "AC",
            Self::AfterMeal => "PC",
            Self::WithMeal => "C",
            Self::BeforeSleep => "HS",
            Self::OnWaking => "WAKE",
        }
    }
}

/// Timing expressed relative to a named event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRelatedInterval {
    /// The anchoring event
    pub event: TimingEvent,
    /// Offset from the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<PhysicalQuantity>,
}

/// A periodically recurring interval, e.g. every 8 hours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodicInterval {
    /// Recurrence period
    pub period: PhysicalQuantity,
    /// Phase anchoring the recurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<TimeInterval>,
    /// True when the institution may adjust exact times
    pub institution_specified: bool,
}

/// The temporal value union the statement tree accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum TemporalValue {
    /// A single point in time
    Instant(Timestamp),
    /// An interval
    Interval(TimeInterval),
    /// A periodic recurrence
    Periodic(PeriodicInterval),
    /// Timing relative to a named event
    EventRelated(EventRelatedInterval),
    /// A set of temporal expressions, e.g. twice daily before meals
    Set(Vec<TemporalValue>),
}

impl TemporalValue {
    /// A single instant
    pub fn instant(value: Timestamp) -> Self {
        Self::Instant(value)
    }

    /// A bounded interval
    pub fn between(low: Timestamp, high: Timestamp) -> Self {
        Self::Interval(IntervalBuilder::new().low(low).high(high).build())
    }

    /// Open-ended, started: only the low bound is known
    pub fn from_instant(low: Timestamp) -> Self {
        Self::Interval(IntervalBuilder::new().low(low).build())
    }

    /// Open-ended, ended: only the high bound is known
    pub fn until_instant(high: Timestamp) -> Self {
        Self::Interval(IntervalBuilder::new().high(high).build())
    }

    /// Symmetric interval around a center
    pub fn around(center: Timestamp, width: PhysicalQuantity) -> Self {
        Self::Interval(IntervalBuilder::new().center(center).width(width).build())
    }

    /// An interval that explicitly states absence
    pub fn unspecified() -> Self {
        Self::Interval(IntervalBuilder::new().build())
    }

    /// Get the instant, if this is one
    pub fn as_instant(&self) -> Option<&Timestamp> {
        match self {
            Self::Instant(ts) => Some(ts),
            _ => None,
        }
    }

    /// Get the interval, if this is one
    pub fn as_interval(&self) -> Option<&TimeInterval> {
        match self {
            Self::Interval(interval) => Some(interval),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_timestamp_precision() {
        assert_eq!(Timestamp::year(2019).precision(), TimePrecision::Year);
        assert_eq!(Timestamp::ymd(2019, 4, 7).precision(), TimePrecision::Day);
        assert_eq!(
            Timestamp::ymd_hm(2019, 4, 7, 15, 30).precision(),
            TimePrecision::Minute
        );
    }

    #[test]
    fn test_timestamp_wire_literal() {
        assert_eq!(Timestamp::year(2019).to_string(), "2019");
        assert_eq!(Timestamp::ymd(2019, 4, 7).to_string(), "20190407");
        assert_eq!(
            Timestamp::ymd_hm(2019, 4, 7, 15, 30).with_offset(600).to_string(),
            "201904071530+1000"
        );
        assert_eq!(
            Timestamp::ymd_hm(2019, 4, 7, 15, 30).with_offset(-330).to_string(),
            "201904071530-0530"
        );
    }

    #[test]
    fn test_empty_interval_degrades_to_explicit_absence() {
        let interval = IntervalBuilder::new().build();
        assert!(interval.is_unspecified());
        assert_eq!(interval.null_flavor, Some(NullFlavor::NoInformation));
    }

    #[test]
    fn test_explicit_null_flavor_overrides_structure() {
        let interval = IntervalBuilder::new()
            .low(Timestamp::ymd(2020, 1, 1))
            .null_flavor(NullFlavor::Masked)
            .build();
        assert!(interval.low.is_none());
        assert_eq!(interval.null_flavor, Some(NullFlavor::Masked));
    }

    #[test]
    fn test_interval_shapes() {
        let started = TemporalValue::from_instant(Timestamp::ymd(2020, 1, 1));
        assert_eq!(
            started.as_interval().unwrap().shape(),
            IntervalShape::OpenEndedStarted
        );

        let ended = TemporalValue::until_instant(Timestamp::ymd(2020, 1, 1));
        assert_eq!(
            ended.as_interval().unwrap().shape(),
            IntervalShape::OpenEndedEnded
        );

        let symmetric = TemporalValue::around(
            Timestamp::ymd(2020, 1, 1),
            PhysicalQuantity::new(Decimal::new(2, 0), "d"),
        );
        assert_eq!(
            symmetric.as_interval().unwrap().shape(),
            IntervalShape::Symmetric
        );
    }

    #[test]
    fn test_no_null_flavor_when_bounds_present() {
        let interval = IntervalBuilder::new()
            .low(Timestamp::ymd(2020, 1, 1))
            .high(Timestamp::ymd(2020, 2, 1))
            .build();
        assert_eq!(interval.shape(), IntervalShape::Bounded);
        assert!(interval.null_flavor.is_none());
    }
}
