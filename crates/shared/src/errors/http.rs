use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => {
                HttpError::BadRequest(format!("Validation failed: {}", errors.join("; ")))
            }

            err @ ServiceError::DuplicateSku { .. } => HttpError::BadRequest(err.to_string()),

            err @ ServiceError::NotFound { .. } => HttpError::NotFound(err.to_string()),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::AlreadyExists(msg) => HttpError::BadRequest(msg),
                other => {
                    error!("💥 Repository failure: {other}");
                    HttpError::Internal("Repository error".into())
                }
            },

            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();

        let msg = match self {
            HttpError::BadRequest(msg) | HttpError::NotFound(msg) | HttpError::Internal(msg) => {
                msg
            }
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        let cases = [
            (ServiceError::validation("name: too short"), StatusCode::BAD_REQUEST),
            (ServiceError::duplicate_sku("X1"), StatusCode::BAD_REQUEST),
            (ServiceError::not_found(7), StatusCode::NOT_FOUND),
            (
                ServiceError::Repo(RepositoryError::AlreadyExists("sku".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::Repo(RepositoryError::NotFound),
                StatusCode::NOT_FOUND,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(HttpError::from(err).status(), expected);
        }
    }

    #[test]
    fn infrastructure_errors_are_server_errors() {
        let err = ServiceError::Repo(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(
            HttpError::from(err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let err = ServiceError::Internal("lock poisoned".into());
        assert_eq!(
            HttpError::from(err).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_keeps_the_domain_message() {
        match HttpError::from(ServiceError::not_found(42)) {
            HttpError::NotFound(msg) => assert_eq!(msg, "Product not found with id: 42"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
