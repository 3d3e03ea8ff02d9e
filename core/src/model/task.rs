use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::TaskFormatError;
use crate::time::{
    format_date, format_date_time, format_time, is_midnight, parse_date, parse_date_time,
    store_date, store_date_time,
};

/// Separator between fields of a stored record.
pub const RECORD_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Todo,
    Deadline,
    Event,
}

impl TaskKind {
    /// Single-letter tag used in both the display and the storage form.
    pub fn tag(self) -> &'static str {
        match self {
            TaskKind::Todo => "T",
            TaskKind::Deadline => "D",
            TaskKind::Event => "E",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "T" => Some(TaskKind::Todo),
            "D" => Some(TaskKind::Deadline),
            "E" => Some(TaskKind::Event),
            _ => None,
        }
    }
}

/// Kind-specific schedule data. The variant fixes the task kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    Todo,
    Deadline { due: NaiveDate },
    // start <= end is not enforced
    Event { start: NaiveDateTime, end: NaiveDateTime },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    pub is_done: bool,
    schedule: Schedule,
}

impl Task {
    /// Builds a task from already-validated parts. Used by the record decoder.
    pub fn new(description: impl Into<String>, is_done: bool, schedule: Schedule) -> Result<Self, TaskFormatError> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(TaskFormatError::EmptyDescription);
        }
        Ok(Self {
            description,
            is_done,
            schedule,
        })
    }

    /// Parses the argument of an add-command into a new, not-done task.
    pub fn parse(kind: TaskKind, argument: &str) -> Result<Self, TaskFormatError> {
        match kind {
            TaskKind::Todo => Self::todo(argument),
            TaskKind::Deadline => Self::deadline(argument),
            TaskKind::Event => Self::event(argument),
        }
    }

    /// `<description>`
    pub fn todo(argument: &str) -> Result<Self, TaskFormatError> {
        Self::new(argument, false, Schedule::Todo)
    }

    /// `<description> /by <YYYY-MM-DD>`
    pub fn deadline(argument: &str) -> Result<Self, TaskFormatError> {
        let segments = split_segments(argument, 2)?;
        let due = segments[1].replace("by", "");
        let due = parse_date(&due).map_err(|_| TaskFormatError::InvalidDate(due.trim().to_string()))?;
        Self::new(segments[0], false, Schedule::Deadline { due })
    }

    /// `<description> /from <date[ time]> /to <date[ time]>`
    pub fn event(argument: &str) -> Result<Self, TaskFormatError> {
        let segments = split_segments(argument, 3)?;
        let start = parse_event_time(&segments[1].replace("from", ""))?;
        let end = parse_event_time(&segments[2].replace("to", ""))?;
        Self::new(segments[0], false, Schedule::Event { start, end })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn kind(&self) -> TaskKind {
        match self.schedule {
            Schedule::Todo => TaskKind::Todo,
            Schedule::Deadline { .. } => TaskKind::Deadline,
            Schedule::Event { .. } => TaskKind::Event,
        }
    }

    /// Lowercased, trimmed description used for search and duplicate checks.
    pub fn normalized_description(&self) -> String {
        self.description.to_lowercase()
    }

    /// `[X] description (...)` without the kind tag.
    pub fn status_line(&self) -> String {
        let mark = if self.is_done { "X" } else { " " };
        match &self.schedule {
            Schedule::Todo => format!("[{}] {}", mark, self.description),
            Schedule::Deadline { due } => {
                format!("[{}] {} (by: {})", mark, self.description, format_date(*due))
            }
            Schedule::Event { start, end } => {
                format!("[{}] {} ({})", mark, self.description, event_range(*start, *end))
            }
        }
    }

    /// Pipe-delimited form written to the task file, one task per line.
    pub fn to_record(&self) -> String {
        let mut fields = vec![
            self.kind().tag().to_string(),
            if self.is_done { "1" } else { "0" }.to_string(),
            self.description.clone(),
        ];
        match &self.schedule {
            Schedule::Todo => {}
            Schedule::Deadline { due } => fields.push(store_date(*due)),
            Schedule::Event { start, end } => {
                fields.push(store_date_time(*start));
                fields.push(store_date_time(*end));
            }
        }
        fields.join(RECORD_SEPARATOR)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}", self.kind().tag(), self.status_line())
    }
}

fn split_segments(argument: &str, expected: usize) -> Result<Vec<&str>, TaskFormatError> {
    let segments: Vec<&str> = argument.split('/').collect();
    if segments.len() != expected {
        return Err(TaskFormatError::SegmentCount {
            expected,
            found: segments.len(),
        });
    }
    if segments[0].trim().is_empty() {
        return Err(TaskFormatError::EmptyDescription);
    }
    Ok(segments)
}

fn parse_event_time(input: &str) -> Result<NaiveDateTime, TaskFormatError> {
    parse_date_time(input).map_err(|_| TaskFormatError::InvalidDate(input.trim().to_string()))
}

fn event_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let same_date = start.date() == end.date();
    let hide_time = is_midnight(start) && is_midnight(end);

    match (same_date, hide_time) {
        (true, true) => format!("on: {}", format_date(start.date())),
        (true, false) => format!("from: {} to: {}", format_date_time(start), format_time(end)),
        (false, true) => format!("from: {} to: {}", format_date(start.date()), format_date(end.date())),
        (false, false) => format!("from: {} to: {}", format_date_time(start), format_date_time(end)),
    }
}
