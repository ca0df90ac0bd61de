use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("filter operator {0} not allowed")]
    Parse(String),

    #[error("unmapped filter field(s): {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("error in validating date {0}")]
    DateFormat(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl FilterError {
    /// True for the three compile-time failures a caller can fix by changing its filter input.
    #[must_use]
    pub fn is_filter_error(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Validation(_) | Self::DateFormat(_))
    }
}
