use thiserror::Error;

use crate::model::command::CommandKind;

/// Plain tag for each way a command can fail to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyDescription,
    InvalidFormat,
    PossibleTypo,
    Unrecognized,
    ExpectNumber,
    ExceedLimit,
}

/// A non-fatal interpretation failure. The session reports it and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("OOPS!!! The description of a {0} cannot be empty.")]
    EmptyDescription(CommandKind),

    #[error("OOPS! It seems you didn't provide a valid {0} format. To create a {0} task, use the following format:")]
    InvalidFormat(CommandKind),

    #[error("OOPS! It appears there might be a typo. Did you mean to write '{0}'?")]
    PossibleTypo(CommandKind),

    #[error("OOPS!!! I'm sorry, but I don't know what that means :-(")]
    Unrecognized,

    #[error("Expect a number (1-{size}) after {command}")]
    ExpectNumber { command: CommandKind, size: usize },

    #[error("The specified number exceeds the limit (1-{size})")]
    ExceedLimit { command: CommandKind, size: usize },
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::EmptyDescription(_) => ErrorKind::EmptyDescription,
            CommandError::InvalidFormat(_) => ErrorKind::InvalidFormat,
            CommandError::PossibleTypo(_) => ErrorKind::PossibleTypo,
            CommandError::Unrecognized => ErrorKind::Unrecognized,
            CommandError::ExpectNumber { .. } => ErrorKind::ExpectNumber,
            CommandError::ExceedLimit { .. } => ErrorKind::ExceedLimit,
        }
    }

    /// The command the failure refers to. `None` when nothing matched.
    pub fn command(&self) -> Option<CommandKind> {
        match self {
            CommandError::EmptyDescription(kind)
            | CommandError::InvalidFormat(kind)
            | CommandError::PossibleTypo(kind) => Some(*kind),
            CommandError::Unrecognized => None,
            CommandError::ExpectNumber { command, .. }
            | CommandError::ExceedLimit { command, .. } => Some(*command),
        }
    }
}

/// Why an add-command argument could not become a task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskFormatError {
    #[error("expected {expected} '/'-separated segments, found {found}")]
    SegmentCount { expected: usize, found: usize },

    #[error("task description is empty")]
    EmptyDescription,

    #[error("invalid date '{0}'")]
    InvalidDate(String),
}
