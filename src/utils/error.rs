use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Book '{identifier}' is not available for loan")]
    BookUnavailable { identifier: String },

    #[error("User {user_id} has reached their limit of {limit} borrowed books")]
    LimitExceeded { user_id: u32, limit: usize },

    #[error("No active loan found for user {user_id} and book '{identifier}'")]
    LoanNotFound { user_id: u32, identifier: String },

    #[error("Book '{identifier}' is not in the catalog")]
    BookNotFound { identifier: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Circulation,
    Catalog,
    Configuration,
    Io,
}

impl LibraryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BookUnavailable { .. }
            | Self::LimitExceeded { .. }
            | Self::LoanNotFound { .. } => ErrorCategory::Circulation,
            Self::BookNotFound { .. } | Self::CsvError(_) => ErrorCategory::Catalog,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Io,
        }
    }

    /// Business-rule rejections leave all state untouched and are safe to report and move on.
    pub fn is_rejection(&self) -> bool {
        self.category() == ErrorCategory::Circulation
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::BookUnavailable { .. } => "The book is not available for loan".to_string(),
            Self::LimitExceeded { limit, .. } => {
                format!("The user has reached their limit of {} borrowed books", limit)
            }
            Self::LoanNotFound { .. } => {
                "No active loan was found for this book and user".to_string()
            }
            Self::BookNotFound { identifier } => {
                format!("No book with identifier '{}' exists in the catalog", identifier)
            }
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::CsvError(e) => format!("The catalog CSV file is malformed: {}", e),
            Self::SerializationError(e) => format!("Could not render the report: {}", e),
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => format!("Invalid configuration: {}", self),
        }
    }

    /// Process exit code for the binary; rejections that escape the walkthrough count as failures too.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Catalog => 2,
            ErrorCategory::Io => 3,
            ErrorCategory::Circulation => 4,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Circulation => "Check the user's active loans and the book's status",
            ErrorCategory::Catalog => "Verify the book identifiers and the CSV columns (title,author,identifier,year,category)",
            ErrorCategory::Configuration => "Fix the configuration file and run again",
            ErrorCategory::Io => "Make sure the file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
