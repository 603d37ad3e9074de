use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

const ILLEGAL_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Removes characters that are not allowed in file names on common platforms.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars().filter(|c| !ILLEGAL_CHARS.contains(c)).collect()
}

/// Picks a calendar file name that is not in `existing`.
///
/// The preferred name is `<base>_<class type>.ics`. When that is taken the
/// meeting's position is used instead, `<base>_<index + 1>_<counter>.ics`,
/// counting up from 1. Every candidate is checked, so at most
/// `existing.len() + 1` names are tried.
pub fn allocate_file_name(
    base: &str,
    class_type: &str,
    index: usize,
    existing: &HashSet<String>,
) -> String {
    let base = sanitize_file_name(base);

    let preferred = format!("{}_{}.ics", base, sanitize_file_name(class_type));
    if !existing.contains(&preferred) {
        return preferred;
    }

    // `existing` cannot hold all of `existing.len() + 1` distinct candidates
    let mut counter = 1;
    loop {
        let candidate = format!("{}_{}_{}.ics", base, index + 1, counter);
        if !existing.contains(&candidate) {
            return candidate;
        }

        debug_assert!(counter <= existing.len());
        counter += 1;
    }
}

/// File names already taken in the output directory.
///
/// Names handed out by [`FileNames::allocate`] are recorded, so several
/// calendars written in one run never collide with each other.
#[derive(Debug, Clone, Default)]
pub struct FileNames {
    taken: HashSet<String>,
}

impl FileNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the set with every file currently in `dir`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let mut taken = HashSet::new();

        for entry in fs::read_dir(dir)? {
            taken.insert(entry?.file_name().to_string_lossy().into_owned());
        }

        Ok(Self { taken })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    pub fn allocate(&mut self, base: &str, class_type: &str, index: usize) -> String {
        let name = allocate_file_name(base, class_type, index, &self.taken);
        self.taken.insert(name.clone());
        name
    }
}

impl FromIterator<String> for FileNames {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            taken: iter.into_iter().collect(),
        }
    }
}
