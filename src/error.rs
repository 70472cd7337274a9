use thiserror::Error;

/// Classifies errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input was empty or otherwise not a hostname string
    InvalidInput,
    /// Hostname contains empty labels (stray dots)
    InvalidHostname,
    /// Hostname is itself a public suffix
    IsPublicSuffix,
    /// Rule list text could not be compiled
    MalformedRuleList,
    /// Global resolver not initialized, or initialized twice
    Initialization,
    /// File read failure
    Io,
}

/// Public suffix engine error types
#[derive(Error, Debug)]
pub enum PslError {
    #[error("Invalid input: hostname must be a non-empty string")]
    InvalidInput,

    #[error("Invalid hostname: {0}")]
    InvalidHostname(String),

    #[error("Hostname is a public suffix: {0}")]
    IsPublicSuffix(String),

    #[error("Malformed rule list: {0}")]
    MalformedRuleList(String),

    #[error("Malformed rule list at line {line}: {message}")]
    MalformedRuleListAtLine { line: usize, message: String },

    #[error("Default resolver is not initialized")]
    NotInitialized,

    #[error("Default resolver is already initialized")]
    AlreadyInitialized,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PslError {
    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PslError::InvalidInput => ErrorKind::InvalidInput,
            PslError::InvalidHostname(_) => ErrorKind::InvalidHostname,
            PslError::IsPublicSuffix(_) => ErrorKind::IsPublicSuffix,
            PslError::MalformedRuleList(_) | PslError::MalformedRuleListAtLine { .. } => {
                ErrorKind::MalformedRuleList
            }
            PslError::NotInitialized | PslError::AlreadyInitialized => ErrorKind::Initialization,
            PslError::IoError(_) => ErrorKind::Io,
        }
    }

    /// True for errors caused by the caller's hostname rather than the rule list.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidInput | ErrorKind::InvalidHostname | ErrorKind::IsPublicSuffix
        )
    }
}

pub type Result<T> = std::result::Result<T, PslError>;
