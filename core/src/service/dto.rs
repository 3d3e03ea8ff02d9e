use crate::model::task::{Task, TaskKind};

/// A task together with its 1-based position in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub position: usize,
    pub task: Task,
}

impl TaskEntry {
    pub fn new(index: usize, task: &Task) -> Self {
        Self {
            position: index + 1,
            task: task.clone(),
        }
    }
}

/// What a successfully interpreted command hands to the display side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Added { task: Task, size: usize },
    Removed { task: Task, size: usize },
    Marked { task: Task, done: bool },
    /// Every task, in order.
    Listing { entries: Vec<TaskEntry> },
    /// Result of `find`.
    Matches { entries: Vec<TaskEntry> },
    /// An add-command was refused because these tasks already exist.
    Duplicates { kind: TaskKind, entries: Vec<TaskEntry> },
}

impl Response {
    /// Whether the command changed the task list.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Response::Added { .. } | Response::Removed { .. } | Response::Marked { .. }
        )
    }
}
