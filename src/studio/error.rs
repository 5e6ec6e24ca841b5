use thiserror::Error;

use crate::core::GenerationError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Sign-in token is empty or malformed")]
    InvalidToken,
    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("No signed-in session")]
    NotSignedIn,

    #[error("Concept brief is empty")]
    EmptyBrief,

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
