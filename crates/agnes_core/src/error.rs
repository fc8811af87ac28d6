use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    InvalidCommand(String),
    InvalidDescription(String),
    InvalidTaskNumber(String),
    TaskIndexOutOfBounds(String),
    InvalidData(String),
    Io(String),
}

impl AppError {
    pub fn invalid_command<M: Into<String>>(message: M) -> Self {
        Self::InvalidCommand(message.into())
    }

    pub fn invalid_description<M: Into<String>>(message: M) -> Self {
        Self::InvalidDescription(message.into())
    }

    pub fn invalid_task_number<M: Into<String>>(message: M) -> Self {
        Self::InvalidTaskNumber(message.into())
    }

    pub fn index_out_of_bounds<M: Into<String>>(message: M) -> Self {
        Self::TaskIndexOutOfBounds(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCommand(_) => "invalid_command",
            Self::InvalidDescription(_) => "invalid_description",
            Self::InvalidTaskNumber(_) => "invalid_task_number",
            Self::TaskIndexOutOfBounds(_) => "index_out_of_bounds",
            Self::InvalidData(_) => "invalid_data",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidCommand(message) => message,
            Self::InvalidDescription(message) => message,
            Self::InvalidTaskNumber(message) => message,
            Self::TaskIndexOutOfBounds(message) => message,
            Self::InvalidData(message) => message,
            Self::Io(message) => message,
        }
    }

    /// Errors a user can cause by typing a bad line; the session keeps going after these.
    pub fn is_command_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCommand(_)
                | Self::InvalidDescription(_)
                | Self::InvalidTaskNumber(_)
                | Self::TaskIndexOutOfBounds(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
