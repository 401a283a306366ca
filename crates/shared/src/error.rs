use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("user identifier must not be empty")]
    EmptyUsername,
    #[error("user identifier {username:?} contains characters outside [A-Za-z0-9_]")]
    InvalidUsername { username: String },
}

/// Raised when a draft does not fit in a single tweet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("draft is {length} characters, limit is below {limit}")]
pub struct ValidationError {
    pub length: usize,
    pub limit: usize,
}
