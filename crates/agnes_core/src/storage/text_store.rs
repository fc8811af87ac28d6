use crate::datetime::{format_date_time, parse_display};
use crate::error::AppError;
use crate::model::{Task, TaskKind, TaskList};
use std::path::{Path, PathBuf};

pub const STORE_ENV_VAR: &str = "AGNES_STORE_PATH";
pub const DEFAULT_STORE_PATH: &str = "data/tasks.txt";
const SEPARATOR: &str = " | ";

/// Resolves where tasks live: an explicit path wins, then `AGNES_STORE_PATH`,
/// then the configured path, then `data/tasks.txt` under the working directory.
pub fn store_path(explicit: Option<&Path>, configured: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    match configured {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_STORE_PATH),
    }
}

/// One task per line, pipe-delimited, rewritten in full on every save.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, tasks: &TaskList) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|err| {
                AppError::io(format!("{}: {}", parent.display(), err))
            })?;
        }

        let mut content = String::new();
        for task in tasks.all() {
            content.push_str(&encode_task(task));
            content.push('\n');
        }

        std::fs::write(&self.path, content)
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;
        log::debug!(
            "saved {} task(s) to {}",
            tasks.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Reads the store back. A missing file is an empty list; lines that do not
    /// decode are logged and skipped.
    pub fn load(&self) -> Result<TaskList, AppError> {
        if !self.path.exists() {
            return Ok(TaskList::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;

        let mut tasks = Vec::new();
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match decode_line(line) {
                Ok(task) => tasks.push(task),
                Err(err) => log::warn!(
                    "skipping line {} of {}: {}",
                    number + 1,
                    self.path.display(),
                    err.message()
                ),
            }
        }

        log::debug!("loaded {} task(s) from {}", tasks.len(), self.path.display());
        Ok(TaskList::from(tasks))
    }
}

pub fn encode_task(task: &Task) -> String {
    let done = if task.complete { '1' } else { '0' };
    let head = format!("{}{SEPARATOR}{done}{SEPARATOR}{}", task.kind.tag(), task.description);
    match task.kind {
        TaskKind::ToDo => head,
        TaskKind::Deadline { due_at } => {
            format!("{head}{SEPARATOR}{}", format_date_time(due_at))
        }
        TaskKind::Event { start_at, end_at } => format!(
            "{head}{SEPARATOR}from {} to: {}",
            format_date_time(start_at),
            format_date_time(end_at)
        ),
    }
}

pub fn decode_line(line: &str) -> Result<Task, AppError> {
    let mut parts = line.splitn(3, SEPARATOR);
    let tag = parts.next().unwrap_or_default().trim();
    let done = parts
        .next()
        .ok_or_else(|| AppError::invalid_data("missing completion flag"))?;
    let rest = parts
        .next()
        .ok_or_else(|| AppError::invalid_data("missing description"))?;

    let complete = match done.trim() {
        "1" => true,
        "0" => false,
        other => {
            return Err(AppError::invalid_data(format!(
                "completion flag must be 0 or 1, got '{other}'"
            )));
        }
    };

    let mut task = match tag {
        "T" => Task::todo(rest.trim()),
        "D" => {
            let (description, due) = rest
                .rsplit_once(SEPARATOR)
                .ok_or_else(|| AppError::invalid_data("deadline is missing its date"))?;
            Task::deadline(description.trim(), parse_display(due)?)
        }
        "E" => {
            let (description, window) = rest
                .rsplit_once(SEPARATOR)
                .ok_or_else(|| AppError::invalid_data("event is missing its dates"))?;
            let (start, end) = window
                .trim()
                .strip_prefix("from ")
                .and_then(|window| window.split_once(" to: "))
                .ok_or_else(|| AppError::invalid_data("event dates must read 'from .. to: ..'"))?;
            Task::event(
                description.trim(),
                parse_display(start)?,
                parse_display(end)?,
            )
            .map_err(|err| AppError::invalid_data(err.message()))?
        }
        other => {
            return Err(AppError::invalid_data(format!("unknown task type '{other}'")));
        }
    };

    if task.description.is_empty() {
        return Err(AppError::invalid_data("description is empty"));
    }
    task.complete = complete;
    Ok(task)
}
