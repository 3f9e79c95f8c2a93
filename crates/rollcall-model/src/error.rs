use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("student not found: {id}")]
    StudentNotFound { id: String },
    #[error("unknown attendance status '{value}'")]
    UnknownStatus { value: String },
    #[error("unknown draw mode '{value}' (expected no-repeat or repeat)")]
    UnknownDrawMode { value: String },
    #[error("draw count must be at least 1")]
    InvalidDrawCount,
}

pub type Result<T> = std::result::Result<T, ModelError>;
