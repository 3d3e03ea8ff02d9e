mod session;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use taskbot_core::{FileTaskRepository, TaskRepository, TaskService};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskbot")]
#[command(about = "An interactive task tracker for todos, deadlines and events", long_about = None)]
struct Cli {
    /// Directory holding the task file (default: ~/.taskbot)
    #[arg(long, env = "TASKBOT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Name of the task file inside the data directory
    #[arg(long, env = "TASKBOT_FILE")]
    file_name: Option<String>,

    /// Text file printed above the greeting
    #[arg(long)]
    banner: Option<PathBuf>,
}

fn init_logging() {
    // ログは stderr へ。stdout は対話用
    let filter = EnvFilter::try_from_env("TASKBOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_banner(path: Option<&PathBuf>) -> Option<String> {
    let path = path?;
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read banner");
            None
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let repo = FileTaskRepository::new(cli.data_dir, cli.file_name.as_deref())?;
    let tasks = repo.load_all().unwrap_or_else(|e| {
        warn!(error = %e, "could not load saved tasks, starting empty");
        Vec::new()
    });
    let mut service = TaskService::with_tasks(repo, tasks);
    let banner = load_banner(cli.banner.as_ref());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session::run(&mut service, stdin.lock(), &mut stdout, banner.as_deref())
}
