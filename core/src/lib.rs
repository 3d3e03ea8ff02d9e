pub mod error;
pub mod model;
pub mod repository;
pub mod input;
pub mod time;
pub mod service;

pub use error::{CommandError, ErrorKind, TaskFormatError};
pub use model::command::{Command, CommandKind, EXIT_KEYWORD, KEYWORDS};
pub use model::task::{Schedule, Task, TaskKind};
pub use repository::{decode_record, FileTaskRepository, TaskRepository};
pub use input::{parse_command, is_near_match, match_keyword};
pub use service::task_list::TaskList;
pub use service::task_service::TaskService;
pub use service::dto::{Response, TaskEntry};
