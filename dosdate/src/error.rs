use std::io;
use thiserror::Error;

use crate::datetime::Field;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid {field} argument '{value}', {field} must be between {min} and {max}")]
    InvalidArgument {
        field: Field,
        value: u16,
        min: u16,
        max: u16,
    },
    #[error("a packed date/time is {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
