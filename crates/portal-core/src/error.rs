//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Account not found")]
    AccountNotFound,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Kyc profile not found")]
    KycProfileNotFound,

    #[error("Appointment not found")]
    AppointmentNotFound,

    #[error("Action not found")]
    ActionNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not active")]
    AccountNotActive,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid or expired recovery token")]
    InvalidResetToken,

    #[error("Password too weak")]
    PasswordTooWeak,

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Email error: {0}")]
    EmailError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
