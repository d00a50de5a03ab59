use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
