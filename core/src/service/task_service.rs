use anyhow::Result;
use tracing::{debug, info, warn};

use crate::error::CommandError;
use crate::input::parse_command;
use crate::model::command::{Command, CommandKind};
use crate::model::task::{Task, TaskKind};
use crate::repository::TaskRepository;
use crate::service::dto::{Response, TaskEntry};
use crate::service::task_list::TaskList;

/// Interprets input lines against the task list and keeps the repository in
/// sync after every change.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    tasks: TaskList,
}

impl<R: TaskRepository> TaskService<R> {
    /// Seeds the list from whatever the repository holds.
    pub fn new(repo: R) -> Result<Self> {
        let tasks = repo.load_all()?;
        Ok(Self::with_tasks(repo, tasks))
    }

    pub fn with_tasks(repo: R, tasks: Vec<Task>) -> Self {
        Self {
            repo,
            tasks: TaskList::new(tasks),
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Runs one line of user input.
    pub fn execute(&mut self, line: &str) -> Result<Response, CommandError> {
        let command = parse_command(line)?;
        self.dispatch(command)
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Response, CommandError> {
        let Command { kind, argument } = command;
        let response = if let Some(task_kind) = kind.task_kind() {
            self.add(task_kind, &argument)?
        } else if kind.takes_index() {
            self.apply_index_command(kind, &argument)?
        } else if kind == CommandKind::Find {
            Response::Matches {
                entries: self.entries(self.tasks.search(&argument, false, false)),
            }
        } else {
            Response::Listing {
                entries: self.entries((0..self.tasks.len()).collect()),
            }
        };

        if response.is_mutation() {
            self.persist();
        }
        Ok(response)
    }

    /// Existing tasks of the same kind whose description equals the new one.
    pub fn find_duplicates(&self, kind: TaskKind, argument: &str) -> Vec<usize> {
        self.tasks
            .search(argument, true, kind == TaskKind::Todo)
            .into_iter()
            .filter(|&i| self.tasks.tasks()[i].kind() == kind)
            .collect()
    }

    fn add(&mut self, kind: TaskKind, argument: &str) -> Result<Response, CommandError> {
        let duplicates = self.find_duplicates(kind, argument);
        if !duplicates.is_empty() {
            debug!(?kind, count = duplicates.len(), "refusing duplicate task");
            return Ok(Response::Duplicates {
                kind,
                entries: self.entries(duplicates),
            });
        }

        let task = Task::parse(kind, argument).map_err(|e| {
            debug!(?kind, argument, error = %e, "invalid task format");
            CommandError::InvalidFormat(kind.into())
        })?;
        let task = self.tasks.add(task).clone();
        info!(%task, size = self.tasks.len(), "task added");
        Ok(Response::Added {
            task,
            size: self.tasks.len(),
        })
    }

    fn apply_index_command(&mut self, kind: CommandKind, argument: &str) -> Result<Response, CommandError> {
        let size = self.tasks.len();
        let out_of_range = CommandError::ExceedLimit { command: kind, size };
        let position: i64 = argument
            .parse()
            .map_err(|_| CommandError::ExpectNumber { command: kind, size })?;
        let index = self
            .tasks
            .index_of_position(position)
            .ok_or_else(|| out_of_range.clone())?;

        match kind {
            CommandKind::Delete => {
                let task = self.tasks.delete(index).ok_or(out_of_range)?;
                info!(%task, size = self.tasks.len(), "task removed");
                Ok(Response::Removed {
                    task,
                    size: self.tasks.len(),
                })
            }
            _ => {
                let done = kind == CommandKind::Mark;
                let task = self.tasks.mark(index, done).ok_or(out_of_range)?.clone();
                info!(%task, done, "task marked");
                Ok(Response::Marked { task, done })
            }
        }
    }

    fn entries(&self, indices: Vec<usize>) -> Vec<TaskEntry> {
        indices
            .into_iter()
            .filter_map(|i| self.tasks.get(i).map(|task| TaskEntry::new(i, task)))
            .collect()
    }

    /// Best effort. A failed save is logged and the in-memory list stays authoritative.
    fn persist(&self) {
        if let Err(e) = self.repo.save_all(self.tasks.tasks()) {
            warn!(error = %e, "failed to save tasks");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use anyhow::anyhow;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MockRepo {
        initial: Vec<Task>,
        saved: RefCell<Vec<Vec<Task>>>,
        fail_saves: bool,
    }

    impl TaskRepository for MockRepo {
        fn load_all(&self) -> Result<Vec<Task>> { Ok(self.initial.clone()) }
        fn save_all(&self, tasks: &[Task]) -> Result<()> {
            if self.fail_saves {
                return Err(anyhow!("disk full"));
            }
            self.saved.borrow_mut().push(tasks.to_vec());
            Ok(())
        }
    }

    fn service_with(lines: &[&str]) -> TaskService<MockRepo> {
        let mut service = TaskService::new(MockRepo::default()).unwrap();
        for line in lines {
            service.execute(line).unwrap();
        }
        service
    }

    fn descriptions(entries: &[TaskEntry]) -> Vec<(usize, &str)> {
        entries.iter().map(|e| (e.position, e.task.description())).collect()
    }

    #[test]
    fn test_seeds_from_repository() {
        let repo = MockRepo {
            initial: vec![Task::todo("old").unwrap()],
            ..Default::default()
        };
        let service = TaskService::new(repo).unwrap();
        assert_eq!(service.tasks().len(), 1);
    }

    #[test]
    fn test_add_todo_and_persist() {
        let mut service = service_with(&[]);
        let response = service.execute("todo read book").unwrap();
        match response {
            Response::Added { task, size } => {
                assert_eq!(task.to_string(), "[T][ ] read book");
                assert_eq!(size, 1);
            }
            other => panic!("unexpected response: {:?}", other),
        }
        let saved = service.repository().saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0][0].description(), "read book");
    }

    #[test]
    fn test_add_deadline_and_event() {
        let mut service = service_with(&[]);
        let deadline = service.execute("deadline return book /by 2023-06-06").unwrap();
        assert!(matches!(deadline, Response::Added { ref task, size: 1 } if task.to_string() == "[D][ ] return book (by: Jun 6 2023)"));

        let event = service
            .execute("event project meeting /from 2023-08-06 14:00 /to 2023-08-06 16:00")
            .unwrap();
        assert!(matches!(event, Response::Added { ref task, size: 2 }
            if task.to_string() == "[E][ ] project meeting (from: Aug 6 2023, 02:00 PM to: 04:00 PM)"));
    }

    #[test]
    fn test_invalid_format_adds_nothing() {
        let mut service = service_with(&[]);
        let err = service.execute("deadline return book").unwrap_err();
        assert_eq!(err, CommandError::InvalidFormat(CommandKind::Deadline));
        assert_eq!(
            service.execute("event talk /from 2023-08-06 /to soon"),
            Err(CommandError::InvalidFormat(CommandKind::Event))
        );
        assert_eq!(
            service.execute("deadline /by 2023-06-06"),
            Err(CommandError::InvalidFormat(CommandKind::Deadline))
        );
        assert!(service.tasks().is_empty());
        assert!(service.repository().saved.borrow().is_empty());
    }

    #[test]
    fn test_duplicate_todo_is_refused() {
        let mut service = service_with(&["todo read book", "todo buy milk"]);
        let response = service.execute("todo  READ Book ").unwrap();
        match response {
            Response::Duplicates { kind, entries } => {
                assert_eq!(kind, TaskKind::Todo);
                assert_eq!(descriptions(&entries), vec![(1, "read book")]);
            }
            other => panic!("unexpected response: {:?}", other),
        }
        assert_eq!(service.tasks().len(), 2);
        assert_eq!(service.repository().saved.borrow().len(), 2);
    }

    #[test]
    fn test_duplicates_are_per_kind() {
        let mut service = service_with(&["todo return book"]);
        let response = service.execute("deadline return book /by 2023-06-06").unwrap();
        assert!(matches!(response, Response::Added { size: 2, .. }));

        let again = service.execute("deadline Return book /by 2024-01-01").unwrap();
        match again {
            Response::Duplicates { kind, entries } => {
                assert_eq!(kind, TaskKind::Deadline);
                assert_eq!(descriptions(&entries), vec![(2, "return book")]);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_list_and_find() {
        let mut service = service_with(&[
            "todo read book",
            "deadline return book /by 2023-06-06",
            "todo buy milk",
        ]);
        match service.execute("list").unwrap() {
            Response::Listing { entries } => assert_eq!(
                descriptions(&entries),
                vec![(1, "read book"), (2, "return book"), (3, "buy milk")]
            ),
            other => panic!("unexpected response: {:?}", other),
        }
        match service.execute("find BOOK").unwrap() {
            Response::Matches { entries } => {
                assert_eq!(descriptions(&entries), vec![(1, "read book"), (2, "return book")])
            }
            other => panic!("unexpected response: {:?}", other),
        }
        match service.execute("find milk /by").unwrap() {
            Response::Matches { entries } => assert_eq!(descriptions(&entries), vec![(3, "buy milk")]),
            other => panic!("unexpected response: {:?}", other),
        }
        // list と find は保存しない
        assert_eq!(service.repository().saved.borrow().len(), 3);
    }

    #[test]
    fn test_mark_and_unmark() {
        let mut service = service_with(&["todo a", "todo b"]);
        let response = service.execute("mark 1").unwrap();
        assert!(matches!(response, Response::Marked { done: true, ref task } if task.is_done));
        assert!(service.tasks().get(0).unwrap().is_done);
        assert!(!service.tasks().get(1).unwrap().is_done);

        service.execute("unmark 1").unwrap();
        assert!(!service.tasks().get(0).unwrap().is_done);
        assert_eq!(service.repository().saved.borrow().len(), 4);
    }

    #[test]
    fn test_delete_renumbers() {
        let mut service = service_with(&["todo a", "todo b", "todo c"]);
        let response = service.execute("delete 2").unwrap();
        assert!(matches!(response, Response::Removed { ref task, size: 2 } if task.description() == "b"));
        match service.execute("list").unwrap() {
            Response::Listing { entries } => assert_eq!(descriptions(&entries), vec![(1, "a"), (2, "c")]),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_index_errors_leave_list_unchanged() {
        let mut service = service_with(&["todo a", "todo b"]);
        let saves = service.repository().saved.borrow().len();

        let err = service.execute("delete 0").unwrap_err();
        assert_eq!(err, CommandError::ExceedLimit { command: CommandKind::Delete, size: 2 });
        assert_eq!(
            service.execute("mark 3"),
            Err(CommandError::ExceedLimit { command: CommandKind::Mark, size: 2 })
        );
        assert_eq!(
            service.execute("unmark -1"),
            Err(CommandError::ExceedLimit { command: CommandKind::Unmark, size: 2 })
        );
        let err = service.execute("delete two").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExpectNumber);
        assert_eq!(err, CommandError::ExpectNumber { command: CommandKind::Delete, size: 2 });

        assert_eq!(service.tasks().len(), 2);
        assert_eq!(service.repository().saved.borrow().len(), saves);
    }

    #[test]
    fn test_parse_errors_pass_through() {
        let mut service = service_with(&[]);
        assert_eq!(service.execute("lisy"), Err(CommandError::PossibleTypo(CommandKind::List)));
        assert_eq!(service.execute("todo"), Err(CommandError::EmptyDescription(CommandKind::Todo)));
        assert_eq!(service.execute("blah blah"), Err(CommandError::Unrecognized));
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let repo = MockRepo {
            fail_saves: true,
            ..Default::default()
        };
        let mut service = TaskService::new(repo).unwrap();
        assert!(service.execute("todo survive").is_ok());
        assert_eq!(service.tasks().len(), 1);
    }
}
