use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::DayEntry;

static DAY_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*day\s*\d+").expect("valid day marker pattern"));

/// Lines of the day currently being collected.
#[derive(Debug, Default)]
enum Accumulator<'a> {
    #[default]
    Empty,
    Collecting(Vec<&'a str>),
}

impl<'a> Accumulator<'a> {
    fn push(self, line: &'a str) -> Self {
        match self {
            Accumulator::Empty => Accumulator::Collecting(vec![line]),
            Accumulator::Collecting(mut lines) => {
                lines.push(line);
                Accumulator::Collecting(lines)
            }
        }
    }

    fn close_into(self, groups: &mut Vec<String>) {
        if let Accumulator::Collecting(lines) = self {
            groups.push(lines.join(" "));
        }
    }
}

#[derive(Debug, Default)]
struct Grouping<'a> {
    finished: Vec<String>,
    current: Accumulator<'a>,
}

impl<'a> Grouping<'a> {
    fn feed(mut self, line: &'a str) -> Self {
        if is_day_marker(line) {
            self.current.close_into(&mut self.finished);
            self.current = Accumulator::Collecting(vec![line]);
        } else {
            self.current = self.current.push(line);
        }
        self
    }

    fn finish(mut self) -> Vec<String> {
        self.current.close_into(&mut self.finished);
        self.finished
    }
}

/// Whether `line` starts with a "Day N" marker.
pub fn is_day_marker(line: &str) -> bool {
    DAY_MARKER.is_match(line)
}

/// Split free-form text into one group per "Day N" marker.
///
/// Lines are trimmed and blank lines dropped; each group is its lines joined
/// with single spaces. Text before the first marker forms its own group. When
/// no non-blank line exists the text itself is returned as the only entry.
pub fn group_lines_by_day(text: &str) -> Vec<DayEntry> {
    let groups = text
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .fold(Grouping::default(), Grouping::feed)
        .finish();

    if groups.is_empty() {
        vec![DayEntry::plain(text)]
    } else {
        groups.into_iter().map(DayEntry::Plain).collect()
    }
}
