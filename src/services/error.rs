use thiserror::Error;

/// Ways a roster request can be refused. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityError {
    #[error("Activity not found")]
    NotFound { activity: String },

    #[error("Student is already signed up for this activity")]
    AlreadyRegistered { activity: String, email: String },

    #[error("Student is not signed up for this activity")]
    NotRegistered { activity: String, email: String },

    #[error("An email query parameter is required")]
    MissingEmail,

    #[error("Invalid query string: {reason}")]
    InvalidQuery { reason: String },
}
