use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

pub const DOS_EPOCH_YEAR: u16 = 1980;
pub const DOS_MAX_YEAR: u16 = DOS_EPOCH_YEAR + 0x7f;

/// One component of a [`DateTimeFields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Year,
        Field::Month,
        Field::Day,
        Field::Hour,
        Field::Minute,
        Field::Second,
        Field::Millisecond,
    ];

    /// The natural range of the field. Year is limited to what the 7-bit
    /// year offset can hold.
    pub fn range(self) -> RangeInclusive<u16> {
        match self {
            Field::Year => DOS_EPOCH_YEAR..=DOS_MAX_YEAR,
            Field::Month => 1..=12,
            Field::Day => 1..=31,
            Field::Hour => 0..=23,
            Field::Minute => 0..=59,
            Field::Second => 0..=59,
            Field::Millisecond => 0..=999,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Year => "Year",
            Field::Month => "Month",
            Field::Day => "Day",
            Field::Hour => "Hour",
            Field::Minute => "Minute",
            Field::Second => "Second",
            Field::Millisecond => "Milliseconds",
        };
        f.write_str(name)
    }
}

/// A calendar date and time split into its components.
///
/// Every component is a plain `u16` and nothing is checked on construction.
/// Ranges are only enforced by [`crate::Validation`]; the loose encoder
/// packs whatever it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeFields {
    pub year: u16,
    /// 1 = January
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
    /// Only used for display, the packed form has no sub-second part.
    pub millisecond: u16,
}

impl Default for DateTimeFields {
    /// 1980-01-01 00:00:00.000, the first instant the encoding can hold.
    fn default() -> Self {
        Self {
            year: DOS_EPOCH_YEAR,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        }
    }
}

impl DateTimeFields {
    pub fn new(year: u16, month: u16, day: u16, hour: u16, minute: u16, second: u16) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond: 0,
        }
    }

    pub fn with_millisecond(mut self, millisecond: u16) -> Self {
        self.millisecond = millisecond;
        self
    }

    pub fn get(&self, field: Field) -> u16 {
        match field {
            Field::Year => self.year,
            Field::Month => self.month,
            Field::Day => self.day,
            Field::Hour => self.hour,
            Field::Minute => self.minute,
            Field::Second => self.second,
            Field::Millisecond => self.millisecond,
        }
    }

    pub fn set(&mut self, field: Field, value: u16) {
        let slot = match field {
            Field::Year => &mut self.year,
            Field::Month => &mut self.month,
            Field::Day => &mut self.day,
            Field::Hour => &mut self.hour,
            Field::Minute => &mut self.minute,
            Field::Second => &mut self.second,
            Field::Millisecond => &mut self.millisecond,
        };
        *slot = value;
    }

    /// The nearest fields the encoding can hold. A year before 1980 becomes
    /// 1980-01-01 00:00:00, a year after 2107 becomes 2107-12-31 23:59:59,
    /// and every other field is clamped to its natural range.
    pub fn saturated(&self) -> Self {
        if self.year < DOS_EPOCH_YEAR {
            return Self::default();
        }
        if self.year > DOS_MAX_YEAR {
            return Self::new(DOS_MAX_YEAR, 12, 31, 23, 59, 59);
        }

        let mut clamped = *self;
        for field in Field::ALL {
            let range = field.range();
            let value = self.get(field).clamp(*range.start(), *range.end());
            clamped.set(field, value);
        }
        clamped
    }

    /// Converts to a chrono timestamp, or `None` if the fields do not name
    /// a real calendar instant (31 February, month 0, hour 24, ...).
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        // chrono reads millisecond >= 1000 as a leap second
        if self.millisecond > 999 {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year.into(), self.month.into(), self.day.into())?
            .and_hms_milli_opt(
                self.hour.into(),
                self.minute.into(),
                self.second.into(),
                self.millisecond.into(),
            )
    }
}

impl From<NaiveDateTime> for DateTimeFields {
    fn from(value: NaiveDateTime) -> Self {
        Self {
            year: value.year().clamp(0, u16::MAX.into()) as u16,
            month: value.month() as u16,
            day: value.day() as u16,
            hour: value.hour() as u16,
            minute: value.minute() as u16,
            second: value.second() as u16,
            millisecond: (value.nanosecond() / 1_000_000).min(999) as u16,
        }
    }
}

impl fmt::Display for DateTimeFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{}  ", self.day, self.month, self.year)?;
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        write!(f, ".{:03}", self.millisecond)
    }
}
