use chrono::NaiveTime;
use log::{debug, warn};
use scraper::{ElementRef, Node};

use crate::parser::{collapse_whitespace, parse_date};
use crate::{Error, MeetingPattern, Result};

/// A piece of text inside one meeting fragment, in document order.
#[derive(Debug, PartialEq, Eq)]
enum Segment {
    /// Text of a `<span class="bold">` label such as `Type:`.
    Label(String),
    Text(String),
}

/// The nodes between one `meetingTimes` marker and the next, flattened.
#[derive(Debug, Default)]
struct Fragment {
    segments: Vec<Segment>,
    text: String,
    days: Option<String>,
}

pub(crate) fn parse_meetings(element: ElementRef) -> Result<Vec<MeetingPattern>> {
    element
        .select(selector!("span.meetingTimes"))
        .map(|marker| parse_meeting(&Fragment::collect(marker)))
        .collect()
}

fn is_marker(element: ElementRef) -> bool {
    element.value().name() == "span" && element.value().classes().any(|c| c == "meetingTimes")
}

fn is_label(element: ElementRef) -> bool {
    element.value().name() == "span" && element.value().classes().any(|c| c == "bold")
}

impl Fragment {
    fn collect(marker: ElementRef) -> Self {
        let mut fragment = Fragment::default();

        let nodes = std::iter::once(*marker).chain(
            marker
                .next_siblings()
                .take_while(|node| !ElementRef::wrap(*node).is_some_and(is_marker)),
        );

        for node in nodes.flat_map(|node| node.descendants()) {
            match node.value() {
                Node::Element(element) => {
                    if element.attr("role") == Some("group") && fragment.days.is_none() {
                        fragment.days = element
                            .attr("title")
                            .and_then(|title| title.trim().strip_prefix("Class on:"))
                            .map(str::to_string);
                    }

                    if let Some(label) = ElementRef::wrap(node).filter(|e| is_label(*e)) {
                        let text = label.text().collect::<String>();
                        fragment.segments.push(Segment::Label(collapse_whitespace(&text)));
                    }
                }
                Node::Text(text) => {
                    fragment.text.push_str(text);

                    let in_label = node
                        .ancestors()
                        .filter_map(ElementRef::wrap)
                        .any(is_label);

                    if !in_label {
                        fragment.segments.push(Segment::Text(text.to_string()));
                    }
                }
                _ => {}
            }
        }

        fragment
    }

    fn label_position(&self, label: &str, from: usize) -> Option<usize> {
        self.segments
            .iter()
            .skip(from)
            .position(|segment| matches!(segment, Segment::Label(l) if l == label))
            .map(|offset| from + offset)
    }

    /// The first non-blank text after the label at `position`, up to the next label.
    fn value_after(&self, position: usize) -> Option<String> {
        self.segments
            .iter()
            .skip(position + 1)
            .take_while(|segment| !matches!(segment, Segment::Label(_)))
            .find_map(|segment| match segment {
                Segment::Text(text) => Some(collapse_whitespace(text)).filter(|t| !t.is_empty()),
                Segment::Label(_) => None,
            })
    }

    fn labelled_value(&self, label: &str) -> Option<String> {
        self.value_after(self.label_position(label, 0)?)
    }

    fn location(&self) -> Option<String> {
        let campus = self.label_position("Location:", 0)?;
        let building = self.label_position("Building:", campus + 1)?;
        let room = self.label_position("Room:", building + 1)?;

        Some(format!(
            "Campus: {}, Building: {}, Room: {}",
            self.value_after(campus)?,
            self.value_after(building)?,
            self.value_after(room)?,
        ))
    }
}

fn parse_meeting(fragment: &Fragment) -> Result<MeetingPattern> {
    let (date_start, date_end) =
        match regex!(r"(\d{2}/\d{2}/\d{4})\s*--\s*(\d{2}/\d{2}/\d{4})").captures(&fragment.text) {
            Some(captures) => (
                Some(parse_date(&captures[1])?),
                Some(parse_date(&captures[2])?),
            ),
            None => (None, None),
        };

    let days = fragment
        .days
        .as_deref()
        .map(|days| {
            days.split(',')
                .map(str::trim)
                .filter(|day| !day.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let (time_start, time_end) = match regex!(
        r"(\d{1,2})\s*:\s*(\d{2})\s*(AM|PM)\s*-\s*(\d{1,2})\s*:\s*(\d{2})\s*(AM|PM)"
    )
    .captures(&fragment.text)
    {
        Some(captures) => (
            Some(parse_time(&captures[1], &captures[2], &captures[3])?),
            Some(parse_time(&captures[4], &captures[5], &captures[6])?),
        ),
        None => (None, None),
    };

    let class_type = fragment.labelled_value("Type:");
    let location = fragment.location();

    if date_start.is_none() || days.is_empty() {
        warn!("meeting fragment without dates or days: {:?}", fragment.text.trim());
    }

    debug!("parsed {class_type:?} meeting on {days:?} from {date_start:?} to {date_end:?}");

    Ok(MeetingPattern {
        date_start,
        date_end,
        time_start,
        time_end,
        days,
        class_type,
        location,
    })
}

fn parse_time(hour: &str, minute: &str, meridiem: &str) -> Result<NaiveTime> {
    let raw = format!("{hour}:{minute} {meridiem}");
    NaiveTime::parse_from_str(&raw, "%I:%M %p").map_err(|_| Error::MalformedTime(raw))
}
