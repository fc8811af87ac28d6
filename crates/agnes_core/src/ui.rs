//! Reply texts. Every function returns finished messages; printing them is
//! left to whichever front end is driving the session.

use crate::datetime::format_date;
use crate::error::AppError;
use crate::model::{Task, TaskList};
use time::Date;

pub const BOT_NAME: &str = "Agnes";

pub fn welcome() -> Vec<String> {
    vec![format!(
        "Hello thereeee! I'm {BOT_NAME}\nWhat can I do for you?"
    )]
}

pub fn bye() -> Vec<String> {
    vec!["Goodbye! Have a wonderful day ahead!".to_string()]
}

pub fn task_added(task: &Task, count: usize) -> Vec<String> {
    vec![format!(
        "New task received. I've added this task:\n  {task}\n{}",
        count_line(count)
    )]
}

pub fn task_deleted(task: &Task, count: usize) -> Vec<String> {
    vec![format!(
        "Noted. I've removed this task:\n  {task}\n{}",
        count_line(count)
    )]
}

pub fn task_marked(task: &Task, done: bool) -> Vec<String> {
    let header = if done {
        "Nice! I've marked this task as done:"
    } else {
        "OK, I've marked this task as not done yet:"
    };
    vec![format!("{header}\n  {task}")]
}

pub fn task_updated(task: &Task) -> Vec<String> {
    vec![format!("Existing task updated:\n  {task}")]
}

pub fn tasks(list: &TaskList) -> Vec<String> {
    if list.is_empty() {
        return vec!["No tasks in your list yet!".to_string()];
    }
    vec![numbered("Here are your tasks:", list.all().iter())]
}

pub fn search_results(found: &[&Task], keyword: &str) -> Vec<String> {
    if found.is_empty() {
        return vec![format!("No tasks with keyword '{keyword}' found.")];
    }
    vec![numbered("Matching tasks in your list:", found.iter().copied())]
}

pub fn tasks_on_date(found: &[&Task], date: Date) -> Vec<String> {
    let day = format_date(date);
    if found.is_empty() {
        return vec![format!("No tasks found on {day}.")];
    }
    vec![numbered(&format!("Tasks on {day}:"), found.iter().copied())]
}

pub fn error(err: &AppError) -> Vec<String> {
    vec![err.message().to_string()]
}

fn count_line(count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("Now you have {count} {noun} in the list.")
}

fn numbered<'a, I>(header: &str, tasks: I) -> String
where
    I: Iterator<Item = &'a Task>,
{
    let mut out = header.to_string();
    for (position, task) in tasks.enumerate() {
        out.push_str(&format!("\n{}. {}", position + 1, task));
    }
    out
}
