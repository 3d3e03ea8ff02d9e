use crate::model::task::Task;
use anyhow::Result;

/// Whole-list persistence. Every save replaces what was stored before.
pub trait TaskRepository {
    /// Returns an empty list when nothing has been stored yet.
    fn load_all(&self) -> Result<Vec<Task>>;
    fn save_all(&self, tasks: &[Task]) -> Result<()>;
}
