use std::io::{self, Write};

use taskbot_core::{CommandError, CommandKind, ErrorKind, Response, TaskEntry};

const SEPARATOR: &str = "____________________________________________________________";

pub fn print_welcome<W: Write>(out: &mut W, banner: Option<&str>) -> io::Result<()> {
    writeln!(out, "{}", SEPARATOR)?;
    if let Some(banner) = banner {
        writeln!(out, "{}", banner.trim_end())?;
    }
    writeln!(out, "Hello! I'm TaskBot!")?;
    writeln!(out, "What can I do for you?")?;
    writeln!(out, "{}", SEPARATOR)
}

pub fn print_goodbye<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "Bye. Hope to see you again soon!")?;
    writeln!(out, "{}", SEPARATOR)
}

pub fn print_response<W: Write>(out: &mut W, response: &Response) -> io::Result<()> {
    writeln!(out, "{}", SEPARATOR)?;
    match response {
        Response::Added { task, size } => {
            writeln!(out, "Got it. I've added this task:")?;
            writeln!(out, "{}", task)?;
            writeln!(out, "Now you have {} task(s) in the list", size)?;
        }
        Response::Removed { task, size } => {
            writeln!(out, "Noted. I've removed this task:")?;
            writeln!(out, "{}", task)?;
            writeln!(out, "Now you have {} task(s) in the list", size)?;
        }
        Response::Marked { task, done } => {
            let state = if *done { "done" } else { "undone" };
            writeln!(out, "Got it. I've mark this task as {}:", state)?;
            writeln!(out, "{}", task)?;
        }
        Response::Listing { entries } => {
            writeln!(out, "Here are the tasks in your list:")?;
            print_entries(out, entries)?;
        }
        Response::Matches { entries } => {
            writeln!(out, "Here are the matching tasks in your list:")?;
            print_entries(out, entries)?;
        }
        Response::Duplicates { entries, .. } => {
            writeln!(out, "Unable to add due to a duplicate record.")?;
            writeln!(out, "Please provide a unique description or delete the existing record to proceed:")?;
            writeln!(out)?;
            print_entries(out, entries)?;
        }
    }
    writeln!(out, "{}", SEPARATOR)
}

pub fn print_error<W: Write>(out: &mut W, error: &CommandError) -> io::Result<()> {
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "{}", error)?;
    if let (ErrorKind::InvalidFormat, Some(kind)) = (error.kind(), error.command()) {
        for line in usage(kind) {
            writeln!(out, "{}", line)?;
        }
    }
    writeln!(out, "{}", SEPARATOR)
}

fn print_entries<W: Write>(out: &mut W, entries: &[TaskEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "{}. {}", entry.position, entry.task)?;
    }
    Ok(())
}

fn usage(kind: CommandKind) -> &'static [&'static str] {
    match kind {
        CommandKind::Deadline => &["deadline [description] /by [date]", "Date Format: yyyy-MM-dd"],
        CommandKind::Event => &[
            "event [description] /from [start date] /to [end date]",
            "Date Format: yyyy-MM-dd OR yyyy-MM-dd HH:mm",
        ],
        _ => &["todo [description]"],
    }
}
