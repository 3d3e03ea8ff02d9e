use std::io::{BufRead, Write};

use anyhow::Result;
use taskbot_core::{TaskRepository, TaskService, EXIT_KEYWORD};
use tracing::debug;

use crate::ui;

/// Reads commands until `bye` or end of input.
pub fn run<R, I, W>(service: &mut TaskService<R>, input: I, out: &mut W, banner: Option<&str>) -> Result<()>
where
    R: TaskRepository,
    I: BufRead,
    W: Write,
{
    ui::print_welcome(out, banner)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case(EXIT_KEYWORD) {
            debug!("exit requested");
            break;
        }
        match service.execute(line) {
            Ok(response) => ui::print_response(out, &response)?,
            Err(e) => ui::print_error(out, &e)?,
        }
        out.flush()?;
    }

    ui::print_goodbye(out)?;
    out.flush()?;
    Ok(())
}
