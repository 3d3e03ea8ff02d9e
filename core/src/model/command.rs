use std::fmt;

use crate::model::task::TaskKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    List,
    Todo,
    Deadline,
    Event,
    Delete,
    Find,
    Mark,
    Unmark,
}

/// Keyword table in matching order. The first near-match wins.
pub const KEYWORDS: [(CommandKind, &str); 8] = [
    (CommandKind::List, "list"),
    (CommandKind::Todo, "todo"),
    (CommandKind::Deadline, "deadline"),
    (CommandKind::Event, "event"),
    (CommandKind::Delete, "delete"),
    (CommandKind::Find, "find"),
    (CommandKind::Mark, "mark"),
    (CommandKind::Unmark, "unmark"),
];

/// Ends the session. Consumed by the session loop, never dispatched.
pub const EXIT_KEYWORD: &str = "bye";

impl CommandKind {
    pub fn keyword(self) -> &'static str {
        match self {
            CommandKind::List => "list",
            CommandKind::Todo => "todo",
            CommandKind::Deadline => "deadline",
            CommandKind::Event => "event",
            CommandKind::Delete => "delete",
            CommandKind::Find => "find",
            CommandKind::Mark => "mark",
            CommandKind::Unmark => "unmark",
        }
    }

    /// The task variant an add-command creates, if this is one.
    pub fn task_kind(self) -> Option<TaskKind> {
        match self {
            CommandKind::Todo => Some(TaskKind::Todo),
            CommandKind::Deadline => Some(TaskKind::Deadline),
            CommandKind::Event => Some(TaskKind::Event),
            _ => None,
        }
    }

    /// Commands whose argument is a 1-based list position.
    pub fn takes_index(self) -> bool {
        matches!(self, CommandKind::Delete | CommandKind::Mark | CommandKind::Unmark)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl From<TaskKind> for CommandKind {
    fn from(kind: TaskKind) -> Self {
        match kind {
            TaskKind::Todo => CommandKind::Todo,
            TaskKind::Deadline => CommandKind::Deadline,
            TaskKind::Event => CommandKind::Event,
        }
    }
}

/// A classified input line. `argument` is everything after the keyword and
/// its separating space, trimmed. Empty for a bare `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub argument: String,
}

impl Command {
    pub fn new(kind: CommandKind, argument: impl Into<String>) -> Self {
        Self {
            kind,
            argument: argument.into(),
        }
    }
}
