use thiserror::Error;

/// Error type for history buffer operations
///
/// Adding a line while history is disabled (capacity 0) is not an error;
/// `add` reports it by returning `false`.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No such history entry: {0}")]
    NotFound(usize),

    #[error("No match for: {0}")]
    NoMatch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl HistoryError {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a no-match error for a prefix query
    pub fn no_match<S: Into<String>>(prefix: S) -> Self {
        Self::NoMatch(prefix.into())
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(index) => {
                format!(
                    "No such history entry: {}. Run 'cmdhist list' to see the recorded entries.",
                    index
                )
            }
            Self::NoMatch(prefix) => {
                format!("No match: no history entry starts with '{}'.", prefix)
            }
            Self::Io(err) => {
                format!("Could not access the history file: {}", err)
            }
            _ => self.to_string(),
        }
    }
}

/// Convenient result type for history operations
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Trait for converting errors to user-friendly messages
pub trait UserFriendlyError {
    fn user_message(&self) -> String;
}

impl UserFriendlyError for HistoryError {
    fn user_message(&self) -> String {
        self.user_message()
    }
}
