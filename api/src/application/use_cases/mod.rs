pub mod auth;
pub mod contents;
pub mod courses;
pub mod modules;
pub mod subjects;

use crate::application::access::AccessError;
use crate::domain::courses::ValidationError;
use crate::domain::ordering::OrderingError;

/// Failure of a course, module or content operation.
#[derive(thiserror::Error, Debug)]
pub enum CourseUseCaseError {
    #[error("resource not found")]
    NotFound,
    #[error("principal may not perform this operation")]
    Forbidden,
    #[error("invalid input")]
    Invalid(#[from] ValidationError),
    #[error("`{field}` is already taken")]
    Conflict { field: &'static str },
    #[error("failed to assign order")]
    Ordering(#[from] OrderingError),
    #[error("storage failure")]
    Store(#[source] anyhow::Error),
}

impl From<AccessError> for CourseUseCaseError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound => CourseUseCaseError::NotFound,
            AccessError::Forbidden => CourseUseCaseError::Forbidden,
            AccessError::Store(e) => CourseUseCaseError::Store(e),
        }
    }
}

impl From<anyhow::Error> for CourseUseCaseError {
    fn from(err: anyhow::Error) -> Self {
        CourseUseCaseError::Store(err)
    }
}
