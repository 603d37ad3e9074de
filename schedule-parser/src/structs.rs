use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

#[cfg(feature = "serde")]
fn serialize_naive_time<S: Serializer>(
    time: &Option<NaiveTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match time {
        Some(time) => serializer.serialize_str(&time.format("%H:%M").to_string()),
        None => serializer.serialize_none(),
    }
}

/// Everything extracted from one `listViewWrapper` fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CourseListing {
    pub course: CourseRecord,
    pub instructor: InstructorRecord,
    pub meetings: Vec<MeetingPattern>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CourseRecord {
    pub title: Option<String>,
    pub section: Option<String>,
    pub class_begin: Option<NaiveDate>,
    pub class_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct InstructorRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub crn: Option<String>,
}

/// One recurring meeting of a course, e.g. the lecture or the lab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MeetingPattern {
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_naive_time"))]
    pub time_start: Option<NaiveTime>,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_naive_time"))]
    pub time_end: Option<NaiveTime>,
    /// Weekday names as listed by the page, e.g. `Monday`.
    pub days: Vec<String>,
    pub class_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub location: Option<String>,
}

/// A single concrete class session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInstance {
    pub title: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub location: Option<String>,
    pub description: String,
}
