//! Domain errors

use thiserror::Error;

/// Broad classification used by dispatchers to decide how an error is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required argument was not supplied at all.
    Syntax,
    /// An argument was supplied but breaks a constraint.
    Validation,
    Authorization,
    NotFound,
    Internal,
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0}")]
    Syntax(String),

    #[error("Group name too long ({length}/{max} characters).")]
    GroupNameTooLong { length: usize, max: usize },

    #[error("Description too long ({length}/{max} characters).")]
    DescriptionTooLong { length: usize, max: usize },

    #[error("System name too long ({length}/{max} characters).")]
    SystemNameTooLong { length: usize, max: usize },

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("You do not have a system registered.")]
    Unauthenticated,

    #[error("You can only run this command on a group in your own system.")]
    Forbidden,

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("System not found: {0}")]
    SystemNotFound(String),

    #[error("Unable to generate a unique human id")]
    UnableToGenerateHid,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Syntax(_) => ErrorKind::Syntax,
            DomainError::GroupNameTooLong { .. }
            | DomainError::DescriptionTooLong { .. }
            | DomainError::SystemNameTooLong { .. }
            | DomainError::InvalidPatch(_)
            | DomainError::ValidationError(_) => ErrorKind::Validation,
            DomainError::Unauthenticated | DomainError::Forbidden => ErrorKind::Authorization,
            DomainError::GroupNotFound(_) | DomainError::SystemNotFound(_) => ErrorKind::NotFound,
            DomainError::UnableToGenerateHid | DomainError::DatabaseError(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Whether the message is meant for the person who ran the command.
    pub fn is_user_error(&self) -> bool {
        self.kind() != ErrorKind::Internal
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
