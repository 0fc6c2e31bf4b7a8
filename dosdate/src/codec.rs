//! Packing of [`DateTimeFields`] into the MS-DOS date and time words.
//!
//! ```text
//! date: | 15 ........ 9 | 8 .... 5 | 4 ..... 0 |
//!       | year - 1980   | month    | day       |
//! time: | 15 ..... 11 | 10 ...... 5 | 4 ..... 0 |
//!       | hour        | minute      | second/2  |
//! ```

use std::fmt;
use std::ops::RangeInclusive;

use chrono::NaiveDateTime;

use crate::datetime::{DOS_EPOCH_YEAR, DateTimeFields, Field};
use crate::error::Error;

/// Which field ranges are checked before packing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Every field must lie in its natural range, see [`Field::range`].
    #[default]
    Strict,
    /// Only the checks the original DOS date/time tool made: year range,
    /// plus month and day lower bounds. Anything else is packed as-is and
    /// may spill into neighbouring bit fields.
    Legacy,
}

impl Validation {
    pub fn check(self, fields: &DateTimeFields) -> Result<(), Error> {
        match self {
            Validation::Strict => {
                for field in Field::ALL {
                    check_field(fields, field, within)?;
                }
                Ok(())
            }
            Validation::Legacy => {
                check_field(fields, Field::Year, within)?;
                check_field(fields, Field::Month, at_least_start)?;
                check_field(fields, Field::Day, at_least_start)
            }
        }
    }
}

fn within(range: &RangeInclusive<u16>, value: &u16) -> bool {
    range.contains(value)
}

fn at_least_start(range: &RangeInclusive<u16>, value: &u16) -> bool {
    value >= range.start()
}

fn check_field<F>(fields: &DateTimeFields, field: Field, accept: F) -> Result<(), Error>
where
    F: FnOnce(&RangeInclusive<u16>, &u16) -> bool,
{
    let range = field.range();
    let value = fields.get(field);
    if accept(&range, &value) {
        return Ok(());
    }

    log::debug!("{field} {value} is outside {range:?}");
    Err(Error::InvalidArgument {
        field,
        value,
        min: *range.start(),
        max: *range.end(),
    })
}

/// The 16-bit MS-DOS date word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DosDate(u16);

impl DosDate {
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Packs without any range check. Out of range values wrap or bleed
    /// into the neighbouring fields.
    pub fn pack(year: u16, month: u16, day: u16) -> Self {
        Self((year.wrapping_sub(DOS_EPOCH_YEAR) << 9) | (month << 5) | day)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub fn year(self) -> u16 {
        DOS_EPOCH_YEAR + (self.0 >> 9)
    }

    /// Returns the month, where 1 = January. Not validated, may be 0 or 13-15.
    pub fn month(self) -> u16 {
        (self.0 >> 5) & 0xf
    }

    pub fn day(self) -> u16 {
        self.0 & 0x1f
    }
}

/// The 16-bit MS-DOS time word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DosTime(u16);

impl DosTime {
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Packs without any range check. The second is floored to an even
    /// value.
    pub fn pack(hour: u16, minute: u16, second: u16) -> Self {
        Self((hour << 11) | (minute << 5) | (second / 2))
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 >> 11
    }

    pub fn minute(self) -> u16 {
        (self.0 >> 5) & 0x3f
    }

    /// Always even, the encoding has a granularity of two seconds.
    pub fn second(self) -> u16 {
        (self.0 & 0x1f) * 2
    }
}

impl fmt::LowerHex for DosDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}

impl fmt::LowerHex for DosTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}

/// A date and time in the MS-DOS representation used by FAT directory
/// entries and ZIP headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DosDateTime {
    date: DosDate,
    time: DosTime,
}

impl DosDateTime {
    pub const fn new(date: DosDate, time: DosTime) -> Self {
        Self { date, time }
    }

    pub const fn from_words(date: u16, time: u16) -> Self {
        Self::new(DosDate::from_bits(date), DosTime::from_bits(time))
    }

    /// Splits the display form, date word high and time word low.
    pub const fn from_u32(value: u32) -> Self {
        Self::from_words((value >> 16) as u16, value as u16)
    }

    pub const fn to_u32(self) -> u32 {
        ((self.date.bits() as u32) << 16) | self.time.bits() as u32
    }

    pub const fn date(self) -> DosDate {
        self.date
    }

    pub const fn time(self) -> DosTime {
        self.time
    }

    /// Packs the fields as they are. Milliseconds are ignored and the
    /// second is floored to an even value. Never fails: the caller is
    /// responsible for keeping the fields in range.
    pub fn encode(fields: &DateTimeFields) -> Self {
        let packed = Self::new(
            DosDate::pack(fields.year, fields.month, fields.day),
            DosTime::pack(fields.hour, fields.minute, fields.second),
        );
        log::trace!("encoded {} as {:x}", fields, packed);
        packed
    }

    /// Like [`DosDateTime::encode`], but rejects any field outside its
    /// natural range instead of producing a corrupted value.
    pub fn encode_strict(fields: &DateTimeFields) -> Result<Self, Error> {
        Self::encode_with(fields, Validation::Strict)
    }

    pub fn encode_with(fields: &DateTimeFields, validation: Validation) -> Result<Self, Error> {
        validation.check(fields)?;
        Ok(Self::encode(fields))
    }

    /// Packs the nearest stamp the encoding can hold, see
    /// [`DateTimeFields::saturated`]. Years before 1980 give
    /// 1980-01-01 00:00:00 and years after 2107 give 2107-12-31 23:59:58.
    /// This is the form archive writers want for arbitrary file times.
    pub fn encode_saturating(fields: &DateTimeFields) -> Self {
        let saturated = fields.saturated();
        if saturated != *fields {
            log::debug!("Saturated {fields} to {saturated}");
        }
        Self::encode(&saturated)
    }

    /// Unpacks into fields. Nothing is validated, so a word that no valid
    /// encode produced can yield month 0, hour 31 and the like. The
    /// millisecond is always 0.
    pub fn decode(self) -> DateTimeFields {
        let fields = DateTimeFields::new(
            self.date.year(),
            self.date.month(),
            self.date.day(),
            self.time.hour(),
            self.time.minute(),
            self.time.second(),
        );
        log::trace!("decoded {:x} as {}", self, fields);
        fields
    }

    pub fn to_naive_datetime(self) -> Option<NaiveDateTime> {
        self.decode().to_naive_datetime()
    }
}

impl fmt::LowerHex for DosDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.to_u32())
    }
}

/// Packs `fields` into `(dos_date, dos_time)` without validation.
pub fn encode(fields: &DateTimeFields) -> (u16, u16) {
    let packed = DosDateTime::encode(fields);
    (packed.date.bits(), packed.time.bits())
}

/// Packs `fields` into `(dos_date, dos_time)`, rejecting out of range fields.
pub fn encode_strict(fields: &DateTimeFields) -> Result<(u16, u16), Error> {
    let packed = DosDateTime::encode_strict(fields)?;
    Ok((packed.date.bits(), packed.time.bits()))
}

/// Packs `fields` into `(dos_date, dos_time)`, pinning out of range input
/// to the first or last representable stamp.
pub fn encode_saturating(fields: &DateTimeFields) -> (u16, u16) {
    let packed = DosDateTime::encode_saturating(fields);
    (packed.date.bits(), packed.time.bits())
}

pub fn decode(dos_date: u16, dos_time: u16) -> DateTimeFields {
    DosDateTime::from_words(dos_date, dos_time).decode()
}
