use crate::error::AppError;
use crate::model::{Task, TaskList};
use crate::parser::{Command, parse_command};
use crate::storage::Storage;
use crate::ui;

/// What one input line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub messages: Vec<String>,
    pub error: Option<AppError>,
    pub exit: bool,
}

impl Reply {
    fn ok(messages: Vec<String>) -> Self {
        Self {
            messages,
            error: None,
            exit: false,
        }
    }

    fn failed(err: AppError) -> Self {
        Self {
            messages: ui::error(&err),
            error: Some(err),
            exit: false,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Owns the task list and its backing store for the lifetime of a conversation.
#[derive(Debug)]
pub struct Session {
    tasks: TaskList,
    storage: Storage,
}

impl Session {
    pub fn new(tasks: TaskList, storage: Storage) -> Self {
        Self { tasks, storage }
    }

    /// Loads whatever the store already holds.
    pub fn open(storage: Storage) -> Result<Self, AppError> {
        let tasks = storage.load()?;
        Ok(Self::new(tasks, storage))
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Handles one line. Errors never escape; they become the reply.
    pub fn respond(&mut self, line: &str) -> Reply {
        match self.execute(line) {
            Ok(reply) => reply,
            Err(err) => {
                log::debug!("line rejected: {err}");
                Reply::failed(err)
            }
        }
    }

    pub fn execute(&mut self, line: &str) -> Result<Reply, AppError> {
        let command = parse_command(line)?;
        log::debug!("dispatching {command:?}");
        let mutating = command.is_mutating();
        let messages = self.apply(command)?;

        if let Some(messages) = messages {
            if mutating {
                self.storage.save(&self.tasks)?;
            }
            return Ok(Reply::ok(messages));
        }

        Ok(Reply {
            messages: ui::bye(),
            error: None,
            exit: true,
        })
    }

    /// Runs a parsed command against the list. `None` means the conversation is over.
    fn apply(&mut self, command: Command) -> Result<Option<Vec<String>>, AppError> {
        let messages = match command {
            Command::Bye => return Ok(None),
            Command::Hi => ui::welcome(),
            Command::List => ui::tasks(&self.tasks),
            Command::On { date } => ui::tasks_on_date(&self.tasks.tasks_on(date), date),
            Command::Find { keyword } => ui::search_results(&self.tasks.find(&keyword), &keyword),
            Command::Todo { description } => self.add(Task::todo(description)),
            Command::Deadline {
                description,
                due_at,
            } => self.add(Task::deadline(description, due_at)),
            Command::Event {
                description,
                start_at,
                end_at,
            } => self.add(Task::event(description, start_at, end_at)?),
            Command::Mark { index } => self.set_complete(&index, true)?,
            Command::Unmark { index } => self.set_complete(&index, false)?,
            Command::Delete { index } => {
                let number = self.tasks.validate_index(&index)?;
                let removed = self.tasks.remove_at(number)?;
                ui::task_deleted(&removed, self.tasks.len())
            }
            Command::Update {
                index,
                field,
                value,
            } => {
                let number = self.tasks.validate_index(&index)?;
                if field.is_empty() {
                    return Err(AppError::invalid_description(
                        "Tell me what to update: update <n> <field> <value>",
                    ));
                }
                let task = self.tasks.get_mut(number)?;
                task.update(&field, &value)?;
                ui::task_updated(task)
            }
        };
        Ok(Some(messages))
    }

    fn add(&mut self, task: Task) -> Vec<String> {
        let count = self.tasks.add(task);
        ui::task_added(&self.tasks.all()[count - 1], count)
    }

    fn set_complete(&mut self, index: &str, done: bool) -> Result<Vec<String>, AppError> {
        let number = self.tasks.validate_index(index)?;
        let task = self.tasks.get_mut(number)?;
        if done {
            task.mark();
        } else {
            task.unmark();
        }
        Ok(ui::task_marked(task, done))
    }
}
