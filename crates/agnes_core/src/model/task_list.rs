use crate::error::AppError;
use crate::model::Task;
use time::Date;

const OUT_OF_RANGE: &str =
    "Your task number is out of my range! Try the command 'list' to see how many tasks you have";

/// Ordered tasks addressed by 1-based position, the way users see them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `task` and returns the new size, which is also its number.
    pub fn add(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len()
    }

    pub fn remove_at(&mut self, number: usize) -> Result<Task, AppError> {
        let index = self.position(number)?;
        Ok(self.tasks.remove(index))
    }

    pub fn get(&self, number: usize) -> Result<&Task, AppError> {
        let index = self.position(number)?;
        Ok(&self.tasks[index])
    }

    pub fn get_mut(&mut self, number: usize) -> Result<&mut Task, AppError> {
        let index = self.position(number)?;
        Ok(&mut self.tasks[index])
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn tasks_on(&self, date: Date) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.falls_on(date)).collect()
    }

    /// Case-sensitive substring match on the description.
    pub fn find(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.description.contains(keyword))
            .collect()
    }

    /// Turns a user-typed task number into a checked 1-based position.
    ///
    /// Anything that is not a 32-bit integer is `InvalidTaskNumber`; an
    /// integer outside `1..=len` is `TaskIndexOutOfBounds`.
    pub fn validate_index(&self, token: &str) -> Result<usize, AppError> {
        let number: i32 = token
            .trim()
            .parse()
            .map_err(|_| AppError::invalid_task_number("Give me a proper task number!"))?;

        if number < 1 {
            return Err(AppError::index_out_of_bounds(OUT_OF_RANGE));
        }
        let number = usize::try_from(number)
            .map_err(|_| AppError::index_out_of_bounds(OUT_OF_RANGE))?;
        self.position(number)?;
        Ok(number)
    }

    fn position(&self, number: usize) -> Result<usize, AppError> {
        if number == 0 || number > self.tasks.len() {
            return Err(AppError::index_out_of_bounds(OUT_OF_RANGE));
        }
        Ok(number - 1)
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}
