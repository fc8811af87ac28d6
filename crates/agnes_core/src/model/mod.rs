pub mod task;
pub mod task_list;

pub use task::{Task, TaskKind, checked_description};
pub use task_list::TaskList;
