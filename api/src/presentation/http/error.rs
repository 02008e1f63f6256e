use axum::http::StatusCode;

use crate::application::use_cases::CourseUseCaseError;
use crate::domain::ordering::OrderingError;

/// Maps a course/module/content failure onto the HTTP status the API answers.
pub(crate) fn status_for(err: CourseUseCaseError) -> StatusCode {
    match err {
        CourseUseCaseError::NotFound => StatusCode::NOT_FOUND,
        CourseUseCaseError::Forbidden => StatusCode::FORBIDDEN,
        CourseUseCaseError::Invalid(e) => {
            tracing::debug!(error = %e, "request_rejected");
            StatusCode::BAD_REQUEST
        }
        CourseUseCaseError::Conflict { field } => {
            tracing::debug!(field, "request_conflict");
            StatusCode::CONFLICT
        }
        CourseUseCaseError::Ordering(OrderingError::Exhausted { entity, max }) => {
            tracing::warn!(entity, max, "order_scope_exhausted");
            StatusCode::CONFLICT
        }
        CourseUseCaseError::Ordering(OrderingError::Configuration { entity, field }) => {
            tracing::error!(entity, field, "order_scope_unresolvable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        CourseUseCaseError::Ordering(OrderingError::Store(e)) | CourseUseCaseError::Store(e) => {
            tracing::error!(error = ?e, "course_store_failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub(crate) fn internal(err: anyhow::Error) -> StatusCode {
    tracing::error!(error = ?err, "request_failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::courses::ValidationError;

    #[test]
    fn statuses() {
        assert_eq!(status_for(CourseUseCaseError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(CourseUseCaseError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status_for(ValidationError::InvalidSlug { field: "slug" }.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(
                OrderingError::Configuration {
                    entity: "modules",
                    field: "course_id"
                }
                .into()
            ),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn caller_fixable_failures_are_not_server_errors() {
        assert_eq!(
            status_for(CourseUseCaseError::Conflict { field: "slug" }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(
                OrderingError::Exhausted {
                    entity: "modules",
                    max: i32::MAX
                }
                .into()
            ),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(
                ValidationError::OrderOutOfRange {
                    field: "order",
                    max: 10
                }
                .into()
            ),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(ValidationError::InvalidUrl { field: "url" }.into()),
            StatusCode::BAD_REQUEST
        );
    }
}
