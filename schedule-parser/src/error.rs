use std::io;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Failures that make a listing or a meeting unusable for calendar output.
///
/// Fields that are simply absent from the markup are never reported here,
/// they come back as `None`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed date `{0}`, expected MM/DD/YYYY")]
    MalformedDate(String),

    #[error("malformed time `{0}`, expected HH:MM AM/PM")]
    MalformedTime(String),

    #[error("class begins on {begin} but ends on {end}")]
    InvalidDateRange { begin: NaiveDate, end: NaiveDate },

    #[error("meeting has no {0}")]
    IncompleteMeeting(&'static str),

    #[error("meeting starts at {start} but ends at {end}")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },

    #[error("local time {0} does not exist in the calendar time zone")]
    NonexistentLocalTime(NaiveDateTime),

    #[error("failed to write calendar: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
