use crate::model::task::Task;

/// Ordered, growable task collection. Positions handed to callers are
/// 0-based here; the dispatcher converts from the 1-based user form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Converts a 1-based user position into an index, if it is in range.
    pub fn index_of_position(&self, position: i64) -> Option<usize> {
        let index = usize::try_from(position).ok()?.checked_sub(1)?;
        (index < self.tasks.len()).then_some(index)
    }

    pub fn add(&mut self, task: Task) -> &Task {
        self.tasks.push(task);
        &self.tasks[self.tasks.len() - 1]
    }

    /// Removes the task at `index`; later tasks move up one position.
    pub fn delete(&mut self, index: usize) -> Option<Task> {
        (index < self.tasks.len()).then(|| self.tasks.remove(index))
    }

    pub fn mark(&mut self, index: usize, is_done: bool) -> Option<&Task> {
        let task = self.tasks.get_mut(index)?;
        task.is_done = is_done;
        Some(task)
    }

    /// Indices of tasks whose description matches `keyword`, in list order.
    ///
    /// The keyword is lowercased and trimmed. Unless `skip_slash_check` is set,
    /// anything from the first `/` on is dropped first, so the date clauses of a
    /// deadline or event never take part in the comparison. `exact` asks for
    /// full equality instead of substring containment.
    pub fn search(&self, keyword: &str, exact: bool, skip_slash_check: bool) -> Vec<usize> {
        let keyword = if skip_slash_check {
            keyword
        } else {
            keyword.split('/').next().unwrap_or_default()
        };
        let keyword = keyword.trim().to_lowercase();

        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| {
                let description = task.normalized_description();
                if exact {
                    description == keyword
                } else {
                    description.contains(&keyword)
                }
            })
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TaskList {
        TaskList::new(vec![
            Task::todo("read book").unwrap(),
            Task::deadline("return book /by 2023-06-06").unwrap(),
            Task::event("book club /from 2023-08-06 /to 2023-08-06").unwrap(),
            Task::todo("buy milk").unwrap(),
        ])
    }

    #[test]
    fn test_add_appends() {
        let mut list = TaskList::default();
        assert!(list.is_empty());
        list.add(Task::todo("a").unwrap());
        let added = list.add(Task::todo("b").unwrap());
        assert_eq!(added.description(), "b");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().description(), "a");
    }

    #[test]
    fn test_delete_renumbers() {
        let mut list = sample();
        let removed = list.delete(1).unwrap();
        assert_eq!(removed.description(), "return book");
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1).unwrap().description(), "book club");
        assert_eq!(list.get(2).unwrap().description(), "buy milk");
        assert!(list.delete(3).is_none());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_mark_touches_one_task() {
        let mut list = sample();
        assert!(list.mark(0, true).unwrap().is_done);
        assert!(list.tasks()[1..].iter().all(|t| !t.is_done));
        assert!(!list.mark(0, false).unwrap().is_done);
        assert!(list.mark(10, true).is_none());
    }

    #[test]
    fn test_index_of_position() {
        let list = sample();
        assert_eq!(list.index_of_position(1), Some(0));
        assert_eq!(list.index_of_position(4), Some(3));
        assert_eq!(list.index_of_position(0), None);
        assert_eq!(list.index_of_position(5), None);
        assert_eq!(list.index_of_position(-2), None);
        assert_eq!(TaskList::default().index_of_position(1), None);
    }

    #[test]
    fn test_search_substring() {
        let list = sample();
        assert_eq!(list.search("BOOK", false, false), vec![0, 1, 2]);
        assert_eq!(list.search("milk", false, false), vec![3]);
        assert!(list.search("pen", false, false).is_empty());
    }

    #[test]
    fn test_search_exact_drops_slash_clause() {
        let list = sample();
        assert_eq!(list.search("Return Book /by 2024-01-01", true, false), vec![1]);
        assert!(list.search("return book /by 2024-01-01", true, true).is_empty());
        assert!(list.search("book", true, false).is_empty());
    }
}
