use std::fmt;

/// Failures recognized by the quiz/gacha/account components.
///
/// Every variant carries the message shown to the browser client; `Display`
/// adds a category prefix for the logs.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    NotFound(String),
    Validation(String),
    Conflict(String),
    DataCorrupt(String),
    /// Valid JSON whose records cannot be read as accounts.
    IncompatibleStore(String),
    InvalidCredentials(String),
    NoMatchingRarity(String),
    Storage(String),
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::DataCorrupt(msg)
            | AppError::IncompatibleStore(msg)
            | AppError::InvalidCredentials(msg)
            | AppError::NoMatchingRarity(msg)
            | AppError::Storage(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::DataCorrupt(msg) => write!(f, "Data corrupt: {}", msg),
            AppError::IncompatibleStore(msg) => write!(f, "Incompatible store: {}", msg),
            AppError::InvalidCredentials(msg) => write!(f, "Invalid credentials: {}", msg),
            AppError::NoMatchingRarity(msg) => write!(f, "No matching rarity: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::DataCorrupt(e.to_string())
    }
}
