pub mod config;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod session;
pub mod storage;
pub mod ui;

pub use error::AppError;
pub use model::{Task, TaskKind, TaskList};
pub use session::{Reply, Session};
pub use storage::Storage;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{Task, TaskKind};

    #[test]
    fn todo_has_required_fields() {
        let task = Task::todo("demo");

        assert_eq!(task.description, "demo");
        assert!(!task.complete);
        assert_eq!(task.kind, TaskKind::ToDo);
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::invalid_description("missing description");
        assert_eq!(err.code(), "invalid_description");
        assert!(err.is_command_error());
        assert_eq!(err.to_string(), "invalid_description - missing description");
        assert!(!AppError::io("disk").is_command_error());
    }
}
