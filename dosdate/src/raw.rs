use zerocopy::byteorder::little_endian::U16;
use zerocopy::*;

use crate::codec::DosDateTime;
use crate::error::Error;

pub const DOS_DATETIME_SIZE: usize = 4;

// A packed date/time, as it appears in ZIP headers and FAT directory entries.
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
#[repr(C, packed)]
pub struct RawDosDateTime {
    time: U16,
    date: U16,
}

impl From<DosDateTime> for RawDosDateTime {
    fn from(value: DosDateTime) -> Self {
        Self {
            time: value.time().bits().into(),
            date: value.date().bits().into(),
        }
    }
}

impl From<RawDosDateTime> for DosDateTime {
    fn from(value: RawDosDateTime) -> Self {
        DosDateTime::from_words(value.date.into(), value.time.into())
    }
}

impl DosDateTime {
    /// The on-disk form: time word then date word, both little-endian.
    pub fn to_le_bytes(self) -> [u8; DOS_DATETIME_SIZE] {
        let mut bytes = [0u8; DOS_DATETIME_SIZE];
        bytes.copy_from_slice(RawDosDateTime::from(self).as_bytes());
        bytes
    }

    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let Ok(raw) = RawDosDateTime::read_from_bytes(bytes) else {
            return Err(Error::InvalidLength {
                expected: DOS_DATETIME_SIZE,
                actual: bytes.len(),
            });
        };
        Ok(raw.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::DateTimeFields;

    #[test]
    fn time_word_comes_first_on_disk() {
        let packed = DosDateTime::from_words(0x58cf, 0x6bd6);
        assert_eq!(packed.to_le_bytes(), [0xd6, 0x6b, 0xcf, 0x58]);
    }

    #[test]
    fn reads_a_zip_header_stamp() {
        // last mod file time/date as found at offset 10 of a local file header
        let header = [0x00, 0x00, 0x21, 0x00];
        let packed = DosDateTime::from_le_bytes(&header).unwrap();
        assert_eq!(packed.to_u32(), 0x0021_0000);
        assert_eq!(packed.decode(), DateTimeFields::default());
    }

    #[test]
    fn raw_struct_matches_byte_helpers() {
        let packed = DosDateTime::encode(&DateTimeFields::new(2107, 12, 31, 23, 59, 58));
        let raw = RawDosDateTime::from(packed);
        assert_eq!(raw.as_bytes(), &packed.to_le_bytes());
        assert_eq!(DosDateTime::from(raw), packed);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            DosDateTime::from_le_bytes(&[0x21, 0x00, 0x00]),
            Err(Error::InvalidLength {
                expected: 4,
                actual: 3,
            })
        );
        assert!(DosDateTime::from_le_bytes(&[0; 5]).is_err());
    }
}
