use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::{describe, expand, serialize, write_calendar, CourseListing, Error, FileNames, Result};

/// Writes one calendar file per meeting pattern of `listing` into `dir`.
///
/// Meetings without dates or times are skipped with a warning. Every other
/// meeting is expanded before anything is written, so a failing meeting
/// leaves no partial output behind. Names are allocated from `names`, which
/// is updated so later listings in the same run do not reuse them. Returns
/// the paths in meeting order.
pub fn emit_calendars<P: AsRef<Path>>(
    listing: &CourseListing,
    dir: P,
    names: &mut FileNames,
) -> Result<Vec<PathBuf>> {
    let title = listing.course.title.as_deref().unwrap_or("Unknown Course");
    let description = describe(&listing.course, &listing.instructor);

    let mut expanded = Vec::with_capacity(listing.meetings.len());

    for (idx, meeting) in listing.meetings.iter().enumerate() {
        match expand(meeting, title, &description) {
            Ok(events) => expanded.push((idx, meeting, events)),
            Err(Error::IncompleteMeeting(field)) => {
                warn!("skipping meeting {} of `{title}`: no {field}", idx + 1);
            }
            Err(err) => return Err(err),
        }
    }

    let mut paths = Vec::with_capacity(expanded.len());

    for (idx, meeting, events) in expanded {
        let class_type = meeting.class_type.as_deref().unwrap_or("Class");
        let file_name = names.allocate(title, class_type, idx);

        let scope = match &listing.instructor.crn {
            Some(crn) => format!("{crn}-{}", idx + 1),
            None => file_name.trim_end_matches(".ics").replace(' ', "-"),
        };

        let path = write_calendar(dir.as_ref(), &file_name, &serialize(title, &scope, &events))?;

        info!("wrote {} events to {}", events.len(), path.display());
        paths.push(path);
    }

    Ok(paths)
}
