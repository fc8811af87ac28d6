use crate::datetime::{self, format_date_time};
use crate::error::AppError;
use std::fmt;
use time::{Date, PrimitiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    ToDo,
    Deadline {
        due_at: PrimitiveDateTime,
    },
    Event {
        start_at: PrimitiveDateTime,
        end_at: PrimitiveDateTime,
    },
}

impl TaskKind {
    pub fn tag(&self) -> char {
        match self {
            Self::ToDo => 'T',
            Self::Deadline { .. } => 'D',
            Self::Event { .. } => 'E',
        }
    }

    fn update_fields(&self) -> &'static str {
        match self {
            Self::ToDo => "/description",
            Self::Deadline { .. } => "/description, /by",
            Self::Event { .. } => "/description, /from, /to",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub complete: bool,
    pub kind: TaskKind,
}

impl Task {
    pub fn todo<D: Into<String>>(description: D) -> Self {
        Self {
            description: description.into(),
            complete: false,
            kind: TaskKind::ToDo,
        }
    }

    pub fn deadline<D: Into<String>>(description: D, due_at: PrimitiveDateTime) -> Self {
        Self {
            description: description.into(),
            complete: false,
            kind: TaskKind::Deadline { due_at },
        }
    }

    /// Fails when the event would end before it starts.
    pub fn event<D: Into<String>>(
        description: D,
        start_at: PrimitiveDateTime,
        end_at: PrimitiveDateTime,
    ) -> Result<Self, AppError> {
        check_event_window(start_at, end_at)?;
        Ok(Self {
            description: description.into(),
            complete: false,
            kind: TaskKind::Event { start_at, end_at },
        })
    }

    pub fn mark(&mut self) {
        self.complete = true;
    }

    pub fn unmark(&mut self) {
        self.complete = false;
    }

    pub fn status_icon(&self) -> char {
        if self.complete { 'X' } else { ' ' }
    }

    /// Deadlines match on the calendar date they are due; events match every
    /// date from their first to their last day, inclusive. To-dos never match.
    pub fn falls_on(&self, date: Date) -> bool {
        match self.kind {
            TaskKind::ToDo => false,
            TaskKind::Deadline { due_at } => due_at.date() == date,
            TaskKind::Event { start_at, end_at } => {
                start_at.date() <= date && date <= end_at.date()
            }
        }
    }

    /// Applies `update <n> <field> <value>`. The task is left untouched on error.
    pub fn update(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AppError::invalid_description(format!(
                "Give me a new value for {field}"
            )));
        }

        let field = field.to_ascii_lowercase();
        let available = self.kind.update_fields();
        match (field.as_str(), &mut self.kind) {
            ("/description", _) => {
                self.description = checked_description(value)?.to_string();
            }
            ("/by", TaskKind::Deadline { due_at }) => {
                *due_at = datetime::parse_date_time(value)?;
            }
            ("/from", TaskKind::Event { start_at, end_at }) => {
                let parsed = datetime::parse_date_time(value)?;
                check_event_window(parsed, *end_at)?;
                *start_at = parsed;
            }
            ("/to", TaskKind::Event { start_at, end_at }) => {
                let parsed = datetime::parse_date_time(value)?;
                check_event_window(*start_at, parsed)?;
                *end_at = parsed;
            }
            _ => {
                return Err(AppError::invalid_description(format!(
                    "Unknown field {field}. Available fields: {available}"
                )));
            }
        }

        Ok(())
    }
}

/// A stored task is one line of text, so descriptions cannot hold control
/// characters such as line breaks.
pub fn checked_description(description: &str) -> Result<&str, AppError> {
    if description.is_empty() {
        return Err(AppError::invalid_description(
            "Tell me what description you want!",
        ));
    }
    if description.chars().any(char::is_control) {
        return Err(AppError::invalid_description(
            "Keep your description on one line, without control characters",
        ));
    }
    Ok(description)
}

fn check_event_window(
    start_at: PrimitiveDateTime,
    end_at: PrimitiveDateTime,
) -> Result<(), AppError> {
    if end_at < start_at {
        return Err(AppError::invalid_description(
            "An event cannot end before it starts",
        ));
    }
    Ok(())
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.kind.tag(),
            self.status_icon(),
            self.description
        )?;
        match self.kind {
            TaskKind::ToDo => Ok(()),
            TaskKind::Deadline { due_at } => write!(f, " (by: {})", format_date_time(due_at)),
            TaskKind::Event { start_at, end_at } => write!(
                f,
                " (from: {} to: {})",
                format_date_time(start_at),
                format_date_time(end_at)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskKind};
    use time::macros::{date, datetime};

    #[test]
    fn new_tasks_start_incomplete() {
        let task = Task::todo("read");
        assert!(!task.complete);
        assert_eq!(task.status_icon(), ' ');
    }

    #[test]
    fn mark_twice_stays_marked() {
        let mut task = Task::todo("read");
        task.mark();
        task.mark();
        assert!(task.complete);
        assert_eq!(task.to_string(), "[T][X] read");

        task.unmark();
        assert_eq!(task.to_string(), "[T][ ] read");
    }

    #[test]
    fn display_renders_dates() {
        let deadline = Task::deadline("report", datetime!(2024-12-01 23:59));
        assert_eq!(deadline.to_string(), "[D][ ] report (by: Dec 01 2024 23:59)");

        let event = Task::event(
            "camp",
            datetime!(2024-12-01 0:00),
            datetime!(2024-12-03 18:30),
        )
        .unwrap();
        assert_eq!(
            event.to_string(),
            "[E][ ] camp (from: Dec 01 2024 to: Dec 03 2024 18:30)"
        );
    }

    #[test]
    fn event_rejects_inverted_window() {
        let err = Task::event(
            "camp",
            datetime!(2024-12-03 0:00),
            datetime!(2024-12-01 0:00),
        )
        .unwrap_err();
        assert_eq!(err.code(), "invalid_description");
    }

    #[test]
    fn falls_on_uses_calendar_dates() {
        let todo = Task::todo("read");
        let deadline = Task::deadline("report", datetime!(2024-12-01 23:59));
        let event = Task::event(
            "camp",
            datetime!(2024-12-01 9:00),
            datetime!(2024-12-03 8:00),
        )
        .unwrap();

        assert!(!todo.falls_on(date!(2024-12-01)));
        assert!(deadline.falls_on(date!(2024-12-01)));
        assert!(!deadline.falls_on(date!(2024-12-02)));
        assert!(event.falls_on(date!(2024-12-01)));
        assert!(event.falls_on(date!(2024-12-02)));
        assert!(event.falls_on(date!(2024-12-03)));
        assert!(!event.falls_on(date!(2024-12-04)));
        assert!(!event.falls_on(date!(2024-11-30)));
    }

    #[test]
    fn update_changes_applicable_fields() {
        let mut deadline = Task::deadline("report", datetime!(2024-12-01 23:59));
        deadline.update("/BY", "2025-01-02").unwrap();
        deadline.update("/description", " final report ").unwrap();

        assert_eq!(deadline.description, "final report");
        assert_eq!(
            deadline.kind,
            TaskKind::Deadline {
                due_at: datetime!(2025-01-02 0:00)
            }
        );
    }

    #[test]
    fn update_rejects_fields_of_other_kinds() {
        let mut todo = Task::todo("read");
        let err = todo.update("/by", "2024-12-01").unwrap_err();
        assert_eq!(err.code(), "invalid_description");
        assert!(err.message().contains("/description"));
        assert_eq!(todo, Task::todo("read"));
    }

    #[test]
    fn update_keeps_event_window_ordered() {
        let mut event = Task::event(
            "camp",
            datetime!(2024-12-01 0:00),
            datetime!(2024-12-03 0:00),
        )
        .unwrap();
        let before = event.clone();

        assert!(event.update("/to", "2024-11-30").is_err());
        assert!(event.update("/from", "2024-12-04").is_err());
        assert!(event.update("/from", "not a date").is_err());
        assert_eq!(event, before);

        event.update("/from", "2024-12-02 1000").unwrap();
        assert!(event.falls_on(date!(2024-12-02)));
        assert!(!event.falls_on(date!(2024-12-01)));
    }

    #[test]
    fn update_rejects_blank_value() {
        let mut todo = Task::todo("read");
        assert_eq!(
            todo.update("/description", "  ").unwrap_err().code(),
            "invalid_description"
        );
    }

    #[test]
    fn update_rejects_multi_line_description() {
        let mut todo = Task::todo("read");
        let err = todo.update("/description", "read\nwrite").unwrap_err();
        assert_eq!(err.code(), "invalid_description");
        assert_eq!(todo, Task::todo("read"));
    }
}
