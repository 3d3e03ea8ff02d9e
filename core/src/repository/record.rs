use anyhow::{anyhow, bail, Result};

use crate::model::task::{Schedule, Task, TaskKind, RECORD_SEPARATOR};
use crate::time::{parse_date, parse_stored_date_time};

/// Rebuilds a task from one line written by [`Task::to_record`].
///
/// The description sits between the done flag and the kind-specific trailing
/// fields, so it is taken as "whatever is left" and may itself contain `|`.
pub fn decode_record(line: &str) -> Result<Task> {
    let mut head = line.splitn(3, RECORD_SEPARATOR);
    let tag = head.next().unwrap_or_default().trim();
    let kind = TaskKind::from_tag(tag).ok_or_else(|| anyhow!("Unknown task kind '{}'", tag))?;
    let is_done = match head.next().map(str::trim) {
        Some("1") => true,
        Some("0") => false,
        Some(other) => bail!("Invalid done flag '{}'", other),
        None => bail!("Missing done flag"),
    };
    let rest = head.next().ok_or_else(|| anyhow!("Missing description"))?;

    let (description, schedule) = match kind {
        TaskKind::Todo => (rest, Schedule::Todo),
        TaskKind::Deadline => {
            let (description, due) = rest
                .rsplit_once(RECORD_SEPARATOR)
                .ok_or_else(|| anyhow!("Missing deadline date"))?;
            (description, Schedule::Deadline { due: parse_date(due)? })
        }
        TaskKind::Event => {
            let (rest, end) = rest
                .rsplit_once(RECORD_SEPARATOR)
                .ok_or_else(|| anyhow!("Missing event end"))?;
            let (description, start) = rest
                .rsplit_once(RECORD_SEPARATOR)
                .ok_or_else(|| anyhow!("Missing event start"))?;
            let schedule = Schedule::Event {
                start: parse_stored_date_time(start)?,
                end: parse_stored_date_time(end)?,
            };
            (description, schedule)
        }
    };

    Ok(Task::new(description, is_done, schedule)?)
}
