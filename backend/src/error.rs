use thiserror::Error;

/// Failures surfaced to whoever fronts the service (an HTTP layer, a CLI).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("invalid email: {0}")]
    InvalidEmail(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing or malformed Authorization header")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,
}

impl AppError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidEmail(_) => "invalid_email",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::MissingToken => "missing_token",
            AppError::InvalidToken => "invalid_token",
        }
    }

    /// HTTP status an outer layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::InvalidEmail(_) => 400,
            AppError::InvalidCredentials | AppError::MissingToken | AppError::InvalidToken => 401,
        }
    }
}
