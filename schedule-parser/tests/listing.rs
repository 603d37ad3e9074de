use std::fs;

use chrono::{Datelike, NaiveDate, NaiveTime};
use schedule_parser::{describe, emit_calendars, expand, extract, split_listings, FileNames};

const PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><title>Class Schedule Listing</title></head>
<body>
<div id="searchResults">
<div class="listViewWrapper">
  <div class="list-view-course-info-div">
    <h3><a class="section-details-link" href="#">Introduction to Programming</a></h3>
    | Computer Science 101 Section 02 | Class Begin: 01/08/2024 | Class End: 05/10/2024
  </div>
  <div class="listViewInstructorInformation">
    <span class="bold">Instructor: </span><a href="mailto:jdoe@college.edu" class="email">Doe,
        Jane</a>
    <br/>
    <span class="bold">CRN: </span><span id="crn40123">40123</span>
  </div>
  <div class="listViewMeetingInformation">
    <span class="meetingTimes">01/08/2024 -- 05/10/2024</span>
    <div class="ui-pillbox" role="group" title="Class on: Monday,Wednesday">
      <div class="ui-pillbox-summary screen-reader">Monday,Wednesday</div>
      <ul><li class="ui-state-highlight">S</li><li>M</li><li>T</li><li>W</li><li>T</li><li>F</li><li>S</li></ul>
    </div>
    <span class="list-view-time"><span>09</span>:<span>00</span> AM - <span>09</span>:<span>50</span> AM</span>
    <span class="bold">Type:</span> Lecture
    <span class="bold">Location:</span> Main Campus&nbsp;
    <span class="bold">Building:</span> Science&nbsp;Hall
    <span class="bold">Room:</span> 101
    <br/>
    <span class="meetingTimes">01/08/2024 -- 05/10/2024</span>
    <div class="ui-pillbox" role="group" title="Class on: Friday">
      <div class="ui-pillbox-summary screen-reader">Friday</div>
    </div>
    <span class="list-view-time"><span>01</span>:<span>00</span> PM - <span>03</span>:<span>50</span> PM</span>
    <span class="bold">Type:</span> Lab
    <span class="bold">Location:</span> Main Campus
    <span class="bold">Building:</span> Engineering
    <span class="bold">Room:</span> B12
    <br/>
  </div>
</div>
<div class="listViewWrapper">
  <div class="list-view-course-info-div">
    Art History | Class Begin: 01/08/2024 | Class End: 05/10/2024
  </div>
  <div class="listViewInstructorInformation">
    <span class="bold">Instructor: </span>TBA
  </div>
  <div class="listViewMeetingInformation">
    <span class="meetingTimes">None</span>
    <span class="bold">Type:</span> Online
  </div>
</div>
</div>
</body>
</html>"##;

#[test]
fn finds_every_listing() {
    assert_eq!(split_listings(PAGE).len(), 2);
    assert!(split_listings("<html><body><p>No classes found</p></body></html>").is_empty());
}

#[test]
fn extracts_full_listing() {
    let listing = extract(&split_listings(PAGE)[0]).unwrap();

    assert_eq!(listing.course.title.as_deref(), Some("Introduction to Programming"));
    assert_eq!(listing.course.section.as_deref(), Some("02"));
    assert_eq!(listing.course.class_begin, NaiveDate::from_ymd_opt(2024, 1, 8));
    assert_eq!(listing.course.class_end, NaiveDate::from_ymd_opt(2024, 5, 10));

    assert_eq!(listing.instructor.name.as_deref(), Some("Doe, Jane"));
    assert_eq!(listing.instructor.email.as_deref(), Some("jdoe@college.edu"));
    assert_eq!(listing.instructor.crn.as_deref(), Some("40123"));

    assert_eq!(listing.meetings.len(), 2);

    let lecture = &listing.meetings[0];
    assert_eq!(lecture.days, ["Monday", "Wednesday"]);
    assert_eq!(lecture.class_type.as_deref(), Some("Lecture"));
    assert_eq!(
        lecture.location.as_deref(),
        Some("Campus: Main Campus, Building: Science Hall, Room: 101")
    );

    let lab = &listing.meetings[1];
    assert_eq!(lab.days, ["Friday"]);
    assert_eq!(lab.time_start, NaiveTime::from_hms_opt(13, 0, 0));
    assert_eq!(lab.time_end, NaiveTime::from_hms_opt(15, 50, 0));
    assert_eq!(
        lab.location.as_deref(),
        Some("Campus: Main Campus, Building: Engineering, Room: B12")
    );
}

#[test]
fn extraction_is_idempotent() {
    for html in split_listings(PAGE) {
        assert_eq!(extract(&html).unwrap(), extract(&html).unwrap());
    }
}

#[test]
fn partial_listing_is_not_an_error() {
    let listing = extract(&split_listings(PAGE)[1]).unwrap();

    assert_eq!(listing.course.title.as_deref(), Some("Art History"));
    assert_eq!(listing.instructor.name, None);
    assert_eq!(listing.meetings.len(), 1);
    assert_eq!(listing.meetings[0].date_start, None);
    assert!(listing.meetings[0].days.is_empty());
}

#[test]
fn lab_sessions_fall_on_fridays() {
    let listing = extract(&split_listings(PAGE)[0]).unwrap();
    let description = describe(&listing.course, &listing.instructor);

    let events = expand(&listing.meetings[1], "Introduction to Programming", &description).unwrap();

    // every Friday from 01/12/2024 through 05/10/2024
    assert_eq!(events.len(), 18);
    assert!(events.iter().all(|event| event.start.weekday() == chrono::Weekday::Fri));
    assert_eq!(events[0].title, "Introduction to Programming - Lab");
    assert_eq!(
        events[0].description,
        "Instructor: Doe, Jane (jdoe@college.edu)\nSection: 02\nCRN: 40123"
    );
}

#[test]
fn writes_lecture_and_lab_calendars() {
    let dir = tempfile::tempdir().unwrap();
    let mut names = FileNames::from_dir(dir.path()).unwrap();

    let listing = extract(&split_listings(PAGE)[0]).unwrap();
    let paths = emit_calendars(&listing, dir.path(), &mut names).unwrap();

    let file_names = paths
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    assert_eq!(
        file_names,
        [
            "Introduction to Programming_Lecture.ics",
            "Introduction to Programming_Lab.ics"
        ]
    );

    let lecture = fs::read_to_string(&paths[0]).unwrap();
    let lab = fs::read_to_string(&paths[1]).unwrap();
    assert_eq!(lecture.matches("BEGIN:VEVENT").count(), 36);
    assert_eq!(lab.matches("BEGIN:VEVENT").count(), 18);

    // a second run into the same directory keeps the first files intact
    let mut names = FileNames::from_dir(dir.path()).unwrap();
    let again = emit_calendars(&listing, dir.path(), &mut names).unwrap();
    assert!(again.iter().all(|path| !paths.contains(path)));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 4);
}

#[test]
fn online_only_listing_writes_no_calendar() {
    let dir = tempfile::tempdir().unwrap();
    let mut names = FileNames::new();

    let listing = extract(&split_listings(PAGE)[1]).unwrap();
    let paths = emit_calendars(&listing, dir.path(), &mut names).unwrap();

    assert!(paths.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
