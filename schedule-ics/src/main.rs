use std::{
    env, fs,
    io::{self, BufRead, Write},
};

use anyhow::{Context, Result};
use log::{error, warn};

use schedule_parser::{emit_calendars, extract, split_listings, CourseListing, FileNames};

mod cli;

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "schedule_ics=info,schedule_parser=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    setup_logging();

    let document = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let listings = split_listings(&document);
    if listings.is_empty() {
        warn!("No course listings found in {}", args.input.display());
        return Ok(());
    }

    let mut names = FileNames::from_dir(&args.output)
        .with_context(|| format!("Failed to list {}", args.output.display()))?;

    for (idx, html) in listings.iter().enumerate() {
        println!("======================================");

        let listing = match extract(html) {
            Ok(listing) => listing,
            Err(err) => {
                error!("Skipping course {}: {err}", idx + 1);
                continue;
            }
        };

        report(&listing, args.json)?;

        let confirmed = if args.skip_calendars {
            false
        } else if args.assume_yes {
            true
        } else {
            prompt()?
        };

        if !confirmed {
            continue;
        }

        match emit_calendars(&listing, &args.output, &mut names) {
            Ok(paths) => {
                for path in paths {
                    println!("Created {}", path.display());
                }
            }
            Err(err) => error!("Failed to create calendars for course {}: {err}", idx + 1),
        }
    }

    Ok(())
}

fn prompt() -> io::Result<bool> {
    print!("Do you want to create a calendar file for this course? (y/n): ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn report(listing: &CourseListing, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(listing)?);
        return Ok(());
    }

    fn or_dash<T: ToString>(value: &Option<T>) -> String {
        value
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string)
    }

    let course = &listing.course;
    println!(
        "Course:     {} (section {})",
        or_dash(&course.title),
        or_dash(&course.section)
    );
    println!(
        "Dates:      {} to {}",
        or_dash(&course.class_begin),
        or_dash(&course.class_end)
    );

    let instructor = &listing.instructor;
    println!(
        "Instructor: {} <{}>, CRN {}",
        or_dash(&instructor.name),
        or_dash(&instructor.email),
        or_dash(&instructor.crn)
    );

    for (idx, meeting) in listing.meetings.iter().enumerate() {
        println!(
            "Meeting {}:  {} on {}, {} to {}, {} to {}",
            idx + 1,
            or_dash(&meeting.class_type),
            if meeting.days.is_empty() {
                "-".to_string()
            } else {
                meeting.days.join(", ")
            },
            or_dash(&meeting.time_start.map(|t| t.format("%H:%M"))),
            or_dash(&meeting.time_end.map(|t| t.format("%H:%M"))),
            or_dash(&meeting.date_start),
            or_dash(&meeting.date_end),
        );

        if let Some(location) = &meeting.location {
            println!("            {location}");
        }
    }

    Ok(())
}
