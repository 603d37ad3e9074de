use std::path::PathBuf;
use std::process;

use getopts::Options;

pub struct Args {
    pub input: PathBuf,
    pub output: PathBuf,
    pub assume_yes: bool,
    pub skip_calendars: bool,
    pub json: bool,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "o",
        "output",
        "Directory to write calendar files to [Default: .]",
        "DIRECTORY",
    );
    opts.optflag(
        "y",
        "yes",
        "Create calendar files for every course without asking",
    );
    opts.optflag(
        "n",
        "no-calendars",
        "Only print the extracted courses, never create calendar files",
    );
    opts.optflag("j", "json", "Print the extracted courses as JSON");
    opts
}

fn usage(opts: &Options) -> String {
    let brief = format!("{} [INPUT, Default: index.html]", opts.short_usage(env!("CARGO_PKG_NAME")));
    opts.usage(&brief)
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", usage(&opts));
        process::exit(0);
    }

    if matches.opt_present("yes") && matches.opt_present("no-calendars") {
        eprintln!("Options 'yes' and 'no-calendars' cannot be combined");
        process::exit(1);
    }

    let input = match matches.free.as_slice() {
        [] => PathBuf::from("index.html"),
        [input] => PathBuf::from(input),
        [_, extra, ..] => {
            eprintln!("Unexpected argument '{extra}'");
            eprintln!("{}", usage(&opts));
            process::exit(1);
        }
    };

    let output = matches
        .opt_str("output")
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    if !output.is_dir() {
        eprintln!(
            "Provided value for option 'output' is not a directory: {}",
            output.display()
        );
        process::exit(1);
    }

    Args {
        input,
        output,
        assume_yes: matches.opt_present("yes"),
        skip_calendars: matches.opt_present("no-calendars"),
        json: matches.opt_present("json"),
    }
}
