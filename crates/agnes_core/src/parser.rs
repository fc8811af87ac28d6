//! Line grammar.
//!
//! The first whitespace-delimited token picks the command (case-insensitive);
//! the rest of the line is its payload. Parsing checks shape only: task
//! numbers are kept as raw tokens because range checks need the current list.

use crate::datetime::{parse_date, parse_date_time};
use crate::error::AppError;
use crate::model::checked_description;
use time::{Date, PrimitiveDateTime};

const UNKNOWN_COMMAND: &str = "I don't understand what you're saying... try again properly";
const MISSING_TASK_NUMBER: &str = "Give me a task number!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Hi,
    Bye,
    List,
    On,
    Todo,
    Deadline,
    Event,
    Mark,
    Unmark,
    Delete,
    Find,
    Update,
    Unknown,
}

impl Keyword {
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "hi" => Self::Hi,
            "bye" => Self::Bye,
            "list" => Self::List,
            "on" => Self::On,
            "todo" => Self::Todo,
            "deadline" => Self::Deadline,
            "event" => Self::Event,
            "mark" => Self::Mark,
            "unmark" => Self::Unmark,
            "delete" => Self::Delete,
            "find" => Self::Find,
            "update" => Self::Update,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hi,
    Bye,
    List,
    On {
        date: Date,
    },
    Todo {
        description: String,
    },
    Deadline {
        description: String,
        due_at: PrimitiveDateTime,
    },
    Event {
        description: String,
        start_at: PrimitiveDateTime,
        end_at: PrimitiveDateTime,
    },
    Mark {
        index: String,
    },
    Unmark {
        index: String,
    },
    Delete {
        index: String,
    },
    Find {
        keyword: String,
    },
    Update {
        index: String,
        field: String,
        value: String,
    },
}

impl Command {
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Todo { .. }
                | Self::Deadline { .. }
                | Self::Event { .. }
                | Self::Mark { .. }
                | Self::Unmark { .. }
                | Self::Delete { .. }
                | Self::Update { .. }
        )
    }
}

pub fn parse_command(line: &str) -> Result<Command, AppError> {
    let (keyword, rest) = split_first_token(line);

    match Keyword::from_token(keyword) {
        Keyword::Hi => Ok(Command::Hi),
        Keyword::Bye => Ok(Command::Bye),
        Keyword::List => Ok(Command::List),
        Keyword::On => Ok(Command::On {
            date: parse_date(rest)?,
        }),
        Keyword::Todo => Ok(Command::Todo {
            description: checked_description(rest)?.to_string(),
        }),
        Keyword::Deadline => parse_deadline(rest),
        Keyword::Event => parse_event(rest),
        Keyword::Mark => Ok(Command::Mark {
            index: required_index(rest)?,
        }),
        Keyword::Unmark => Ok(Command::Unmark {
            index: required_index(rest)?,
        }),
        Keyword::Delete => Ok(Command::Delete {
            index: required_index(rest)?,
        }),
        Keyword::Find => {
            if rest.is_empty() {
                return Err(AppError::invalid_description(
                    "Tell me what keyword to look for!",
                ));
            }
            Ok(Command::Find {
                keyword: rest.to_string(),
            })
        }
        Keyword::Update => {
            let index = required_index(rest)?;
            let (_, remainder) = split_first_token(rest);
            let (field, value) = split_first_token(remainder);
            Ok(Command::Update {
                index,
                field: field.to_string(),
                value: value.to_string(),
            })
        }
        Keyword::Unknown => Err(AppError::invalid_command(UNKNOWN_COMMAND)),
    }
}

fn parse_deadline(rest: &str) -> Result<Command, AppError> {
    let (description, due) = split_at_flag(rest, "/by").ok_or_else(|| {
        AppError::invalid_description("Specify your deadline using '/by'...")
    })?;
    let description = checked_description(description)?.to_string();
    let due_at = parse_date_time(due)?;

    Ok(Command::Deadline {
        description,
        due_at,
    })
}

fn parse_event(rest: &str) -> Result<Command, AppError> {
    let missing = || {
        AppError::invalid_description("Specify your event duration using '/from' and '/to'...")
    };
    let (description, window) = split_at_flag(rest, "/from").ok_or_else(missing)?;
    let (start, end) = split_at_flag(window, "/to").ok_or_else(missing)?;
    let description = checked_description(description)?.to_string();
    let start_at = parse_date_time(start)?;
    let end_at = parse_date_time(end)?;

    Ok(Command::Event {
        description,
        start_at,
        end_at,
    })
}

fn required_index(rest: &str) -> Result<String, AppError> {
    let (index, _) = split_first_token(rest);
    if index.is_empty() {
        return Err(AppError::invalid_task_number(MISSING_TASK_NUMBER));
    }
    Ok(index.to_string())
}

/// Returns the first whitespace-delimited token and the trimmed remainder.
pub fn split_first_token(line: &str) -> (&str, &str) {
    let trimmed = line.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (trimmed, ""),
    }
}

/// Splits around `flag` where it stands as a whole whitespace-delimited token.
fn split_at_flag<'a>(text: &'a str, flag: &str) -> Option<(&'a str, &'a str)> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(flag) {
        let start = search_from + offset;
        let end = start + flag.len();
        let token_start = text[..start]
            .chars()
            .next_back()
            .is_none_or(char::is_whitespace);
        let token_end = text[end..].chars().next().is_none_or(char::is_whitespace);
        if token_start && token_end {
            return Some((text[..start].trim(), text[end..].trim()));
        }
        search_from = end;
    }
    None
}
