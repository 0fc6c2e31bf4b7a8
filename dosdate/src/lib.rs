pub mod clock;
pub mod codec;
pub mod datetime;
pub mod error;
pub mod raw;

pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{
    DosDate, DosDateTime, DosTime, Validation, decode, encode, encode_saturating, encode_strict,
};
pub use datetime::{DOS_EPOCH_YEAR, DOS_MAX_YEAR, DateTimeFields, Field};
pub use error::Error;
pub use raw::RawDosDateTime;
