//! Crate-level errors.

use thiserror::Error;

use crate::chinese::UnknownZodiac;
use crate::date::Date;
use crate::oracle::OracleError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("month {0} is not in 1..=12")]
    InvalidMonth(u32),
    /// The first day of the month has no [`Date`]; nothing was asked of the
    /// oracle.
    #[error("{year}-{month:02} is outside the representable date range")]
    UnrepresentableMonth { year: i32, month: u32 },
    /// The oracle failed for one date of a grid; no partial grid is produced.
    #[error("day oracle failed for {date}")]
    Oracle {
        date: Date,
        #[source]
        source: OracleError,
    },
    #[error("unknown zodiac sign {0:?}")]
    UnknownZodiac(String),
    #[error("unknown activity {0:?}")]
    UnknownActivity(String),
    #[error("timezone offset of {0} minutes is out of range")]
    InvalidTimezone(i32),
    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<UnknownZodiac> for Error {
    fn from(UnknownZodiac(name): UnknownZodiac) -> Self {
        Self::UnknownZodiac(name)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
