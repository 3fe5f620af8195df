use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Place not found")]
    PlaceNotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Review id already exists: {0}")]
    DuplicateReviewId(String),
}
