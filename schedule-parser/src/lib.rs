macro_rules! selector {
    ($query:expr) => {{
        static SELECTOR: once_cell::sync::Lazy<scraper::Selector> =
            once_cell::sync::Lazy::new(|| scraper::Selector::parse($query).unwrap());
        &SELECTOR
    }};
}

macro_rules! regex {
    ($pattern:expr) => {{
        static REGEX: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pattern).unwrap());
        &REGEX
    }};
}

mod error;
mod meeting;
mod naming;
mod parser;
mod recurrence;
mod structs;

#[cfg(feature = "ics")]
mod emit;
#[cfg(feature = "ics")]
mod ics;

pub use error::{Error, Result};
pub use naming::{allocate_file_name, sanitize_file_name, FileNames};
pub use parser::{extract, split_listings};
pub use recurrence::{describe, expand, TIME_ZONE};
pub use structs::{CourseListing, CourseRecord, EventInstance, InstructorRecord, MeetingPattern};

#[cfg(feature = "ics")]
pub use emit::emit_calendars;
#[cfg(feature = "ics")]
pub use ics::{serialize, to_ics, write_calendar};
