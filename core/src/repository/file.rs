use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use crate::model::task::Task;
use crate::repository::record::decode_record;
use crate::repository::traits::TaskRepository;

pub const DEFAULT_FILE_NAME: &str = "tasks.txt";
const DEFAULT_DIR_NAME: &str = ".taskbot";

/// Stores tasks as one pipe-delimited record per line.
#[derive(Debug, Clone)]
pub struct FileTaskRepository {
    file_path: PathBuf,
}

impl FileTaskRepository {
    /// `base_dir` defaults to `~/.taskbot`. Nothing is created until the first save.
    pub fn new(base_dir: Option<PathBuf>, file_name: Option<&str>) -> Result<Self> {
        let dir = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(DEFAULT_DIR_NAME)
            }
        };
        let file_path = dir.join(file_name.unwrap_or(DEFAULT_FILE_NAME));
        Ok(FileTaskRepository { file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl TaskRepository for FileTaskRepository {
    fn load_all(&self) -> Result<Vec<Task>> {
        let file = match File::open(&self.file_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.file_path.display(), "no task file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open {}", self.file_path.display()))
            }
        };

        let mut tasks = Vec::new();
        for (number, raw) in BufReader::new(file).split(b'\n').enumerate() {
            let mut raw = raw?;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    warn!(line = number + 1, error = %e, "skipping task record that is not UTF-8");
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match decode_record(&line) {
                Ok(task) => tasks.push(task),
                Err(e) => warn!(line = number + 1, error = %e, "skipping unreadable task record"),
            }
        }
        info!(count = tasks.len(), path = %self.file_path.display(), "loaded tasks");
        Ok(tasks)
    }

    fn save_all(&self, tasks: &[Task]) -> Result<()> {
        if let Some(dir) = self.file_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let file = File::create(&self.file_path)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        let mut writer = BufWriter::new(file);
        for task in tasks {
            writeln!(writer, "{}", task.to_record())?;
        }
        writer.flush()?;
        info!(count = tasks.len(), path = %self.file_path.display(), "saved tasks");
        Ok(())
    }
}
