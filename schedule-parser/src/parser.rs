use chrono::NaiveDate;
use log::debug;
use scraper::{ElementRef, Html};

use crate::meeting::parse_meetings;
use crate::{CourseListing, CourseRecord, Error, InstructorRecord, Result};

/// Returns the markup of every course listing on a search results page.
pub fn split_listings<S: AsRef<str>>(document: S) -> Vec<String> {
    let html = Html::parse_document(document.as_ref());
    html.select(selector!("div.listViewWrapper"))
        .map(|listing| listing.html())
        .collect()
}

/// Extracts course, instructor and meeting information from a single listing.
///
/// Missing fields come back as `None`. Dates and times that are present but
/// cannot be parsed are reported as errors.
pub fn extract<S: AsRef<str>>(s: S) -> Result<CourseListing> {
    let html = Html::parse_fragment(s.as_ref());

    let course = match html.select(selector!("div.list-view-course-info-div")).next() {
        Some(element) => parse_course(element)?,
        None => CourseRecord::default(),
    };

    let instructor = html
        .select(selector!("div.listViewInstructorInformation"))
        .next()
        .map(parse_instructor)
        .unwrap_or_default();

    let meetings = match html.select(selector!("div.listViewMeetingInformation")).next() {
        Some(element) => parse_meetings(element)?,
        None => Vec::new(),
    };

    Ok(CourseListing {
        course,
        instructor,
        meetings,
    })
}

fn parse_course(element: ElementRef) -> Result<CourseRecord> {
    let text = element.text().collect::<String>();
    let text = text.trim();

    let title = regex!(r"^(.*?)\s*\|")
        .captures(text)
        .map(|captures| captures[1].to_string());

    let section = regex!(r"\bSection\s+([A-Za-z0-9]+)")
        .captures(text)
        .map(|captures| captures[1].to_string());

    let class_begin = regex!(r"Class Begin:\s*(\d{2}/\d{2}/\d{4})\s*\|")
        .captures(text)
        .map(|captures| parse_date(&captures[1]))
        .transpose()?;

    let class_end = regex!(r"Class End:\s*(\d{2}/\d{2}/\d{4})")
        .captures(text)
        .map(|captures| parse_date(&captures[1]))
        .transpose()?;

    if let (Some(begin), Some(end)) = (class_begin, class_end) {
        if begin > end {
            return Err(Error::InvalidDateRange { begin, end });
        }
    }

    debug!("parsed course {title:?}, section {section:?}, {class_begin:?} to {class_end:?}");

    Ok(CourseRecord {
        title,
        section,
        class_begin,
        class_end,
    })
}

/// Name, email and CRN are only taken together: a `mailto:` anchor after the
/// `Instructor:` label and digits after the `CRN:` label. When any of them is
/// missing the record is empty.
fn parse_instructor(element: ElementRef) -> InstructorRecord {
    let anchor = labelled_element(element, "Instructor:").filter(|e| e.value().name() == "a");

    let email = anchor
        .and_then(|anchor| anchor.value().attr("href"))
        .and_then(|href| href.strip_prefix("mailto:"))
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty());

    let name = anchor
        .map(|anchor| collapse_whitespace(&anchor.text().collect::<String>()))
        .filter(|name| !name.is_empty());

    let crn = labelled_element(element, "CRN:")
        .map(|crn| crn.text().collect::<String>().trim().to_string())
        .filter(|crn| !crn.is_empty() && crn.bytes().all(|b| b.is_ascii_digit()));

    match (name, email, crn) {
        (Some(name), Some(email), Some(crn)) => InstructorRecord {
            name: Some(name),
            email: Some(email),
            crn: Some(crn),
        },
        _ => {
            debug!("instructor information incomplete, leaving it empty");
            InstructorRecord::default()
        }
    }
}

/// The first element following the bold label whose text is `label`.
fn labelled_element<'a>(scope: ElementRef<'a>, label: &str) -> Option<ElementRef<'a>> {
    scope
        .select(selector!("span.bold"))
        .find(|span| span.text().collect::<String>().trim() == label)?
        .next_siblings()
        .find_map(ElementRef::wrap)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").map_err(|_| Error::MalformedDate(raw.into()))
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
