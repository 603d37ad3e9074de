use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use log::debug;

use crate::{CourseRecord, Error, EventInstance, InstructorRecord, MeetingPattern, Result};

/// All class sessions are placed in this zone.
pub const TIME_ZONE: Tz = chrono_tz::America::Los_Angeles;

/// Expands a meeting pattern into one event per matching weekday.
///
/// Weekday names are compared exactly against the English names chrono
/// formats with `%A` (`Monday`, `Tuesday`, ...). A range that ends before it
/// starts, or contains none of the weekdays, yields no events.
pub fn expand(
    meeting: &MeetingPattern,
    course_title: &str,
    description: &str,
) -> Result<Vec<EventInstance>> {
    let date_start = meeting.date_start.ok_or(Error::IncompleteMeeting("start date"))?;
    let date_end = meeting.date_end.ok_or(Error::IncompleteMeeting("end date"))?;
    let time_start = meeting.time_start.ok_or(Error::IncompleteMeeting("start time"))?;
    let time_end = meeting.time_end.ok_or(Error::IncompleteMeeting("end time"))?;

    if time_start >= time_end {
        return Err(Error::InvalidTimeRange {
            start: time_start,
            end: time_end,
        });
    }

    let title = format!(
        "{} - {}",
        course_title,
        meeting.class_type.as_deref().unwrap_or("Class")
    );

    let mut events = Vec::new();

    for date in date_start.iter_days().take_while(|date| *date <= date_end) {
        let weekday = date.format("%A").to_string();
        if !meeting.days.contains(&weekday) {
            continue;
        }

        events.push(EventInstance {
            title: title.clone(),
            start: localize(date, time_start)?,
            end: localize(date, time_end)?,
            location: meeting.location.clone(),
            description: description.to_string(),
        });
    }

    debug!("expanded `{title}` into {} events", events.len());

    Ok(events)
}

/// Ambiguous times during the fall-back hour resolve to standard time.
fn localize(date: NaiveDate, time: NaiveTime) -> Result<DateTime<Tz>> {
    let local = date.and_time(time);
    TIME_ZONE
        .from_local_datetime(&local)
        .latest()
        .ok_or(Error::NonexistentLocalTime(local))
}

/// The event description shared by every session of a course.
pub fn describe(course: &CourseRecord, instructor: &InstructorRecord) -> String {
    format!(
        "Instructor: {} ({})\nSection: {}\nCRN: {}",
        instructor.name.as_deref().unwrap_or("Unknown Instructor"),
        instructor.email.as_deref().unwrap_or_default(),
        course.section.as_deref().unwrap_or_default(),
        instructor.crn.as_deref().unwrap_or_default(),
    )
}
