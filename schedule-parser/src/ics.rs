use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use ics::{
    escape_text,
    parameters::TzIDParam,
    properties::{Description, DtEnd, DtStart, Location, RRule, Summary, TzName},
    Daylight, ICalendar, Standard, TimeZone,
};

use crate::{EventInstance, Result, TIME_ZONE};

fn pacific_timezone<'a>() -> TimeZone<'a> {
    let mut pst_standard = Standard::new("19701101T020000", "-0700", "-0800");
    pst_standard.push(TzName::new("PST"));
    pst_standard.push(RRule::new("FREQ=YEARLY;BYMONTH=11;BYDAY=1SU"));

    let mut pdt_daylight = Daylight::new("19700308T020000", "-0800", "-0700");
    pdt_daylight.push(TzName::new("PDT"));
    pdt_daylight.push(RRule::new("FREQ=YEARLY;BYMONTH=3;BYDAY=2SU"));

    let mut timezone = TimeZone::daylight(TIME_ZONE.name(), pdt_daylight);
    timezone.add_standard(pst_standard);

    timezone
}

fn local_timestamp(datetime: &DateTime<Tz>) -> String {
    datetime.format("%Y%m%dT%H%M%S").to_string()
}

fn utc_timestamp(datetime: &DateTime<Tz>) -> String {
    datetime.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
}

/// Builds one calendar holding every event of a meeting pattern.
///
/// `scope` names the meeting pattern, e.g. `<CRN>-<meeting number>`, and is
/// appended to every UID so sessions of different patterns that start at the
/// same time stay distinct.
#[must_use]
pub fn to_ics<'a, S: Into<Cow<'a, str>>>(
    name: S,
    scope: &str,
    events: &'a [EventInstance],
) -> ICalendar<'a> {
    let mut icalendar = ICalendar::new("2.0", name);
    icalendar.add_timezone(pacific_timezone());

    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    for event in events {
        icalendar.add_event(event.to_ics(scope, &stamp));
    }

    icalendar
}

/// Renders the calendar text for `events`.
pub fn serialize<'a, S: Into<Cow<'a, str>>>(
    name: S,
    scope: &str,
    events: &'a [EventInstance],
) -> String {
    to_ics(name, scope, events).to_string()
}

/// Writes a calendar document to `dir/file_name`, replacing any file there.
pub fn write_calendar<P: AsRef<Path>>(dir: P, file_name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.as_ref().join(file_name);

    let mut writer = BufWriter::new(File::create(&path)?);
    writer.write_all(contents.as_bytes())?;
    writer.flush()?;

    Ok(path)
}

impl EventInstance {
    /// `stamp` is the UTC time the calendar was generated.
    #[must_use]
    pub fn to_ics(&self, scope: &str, stamp: &str) -> ics::Event<'_> {
        let id = format!(
            "{}_{}_{}",
            utc_timestamp(&self.start),
            self.title.replace(' ', "-"),
            scope
        );

        let mut ics_event = ics::Event::new(id, stamp.to_string());

        let mut start = DtStart::new(local_timestamp(&self.start));
        start.add(TzIDParam::new(TIME_ZONE.name()));
        ics_event.push(start);

        let mut end = DtEnd::new(local_timestamp(&self.end));
        end.add(TzIDParam::new(TIME_ZONE.name()));
        ics_event.push(end);

        ics_event.push(Summary::new(escape_text(self.title.as_str())));

        if let Some(location) = &self.location {
            ics_event.push(Location::new(escape_text(location.as_str())));
        }

        ics_event.push(Description::new(escape_text(self.description.as_str())));

        ics_event
    }
}
