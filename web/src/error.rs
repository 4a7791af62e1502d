use std::error::Error as StdError;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::error::{
    DomainErrorKind, EntityErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind,
};

use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

/// Builds the `{"error": ...}` body every failed request receives.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.0.error_kind {
            DomainErrorKind::Validation(details) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid request", "details": details })),
            )
                .into_response(),
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::Entity(entity_error_kind) => match entity_error_kind {
                    EntityErrorKind::NotFound => {
                        error_response(StatusCode::NOT_FOUND, "Summary not found")
                    }
                    EntityErrorKind::Invalid => {
                        error_response(StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable entity")
                    }
                    EntityErrorKind::DbTransaction | EntityErrorKind::Other(_) => {
                        error!("Database error: {:?}", self.0.source);
                        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                    }
                },
                InternalErrorKind::Config => {
                    error!("Configuration error: {:?}", self.0.source);
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
                InternalErrorKind::Other(msg) => {
                    error!("Internal error: {msg}");
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
            DomainErrorKind::External(external_error_kind) => match external_error_kind {
                ExternalErrorKind::Network => {
                    error_response(StatusCode::BAD_GATEWAY, "Model provider unavailable")
                }
                ExternalErrorKind::Timeout => {
                    error_response(StatusCode::GATEWAY_TIMEOUT, "Model provider timed out")
                }
                ExternalErrorKind::RateLimited {
                    retry_after_seconds,
                } => {
                    let mut response = error_response(
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Model provider rate limit exceeded",
                    );
                    response
                        .headers_mut()
                        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_seconds));
                    response
                }
                ExternalErrorKind::Other(msg) => {
                    warn!("Upstream model error: {msg}");
                    error_response(StatusCode::BAD_GATEWAY, "Bad gateway")
                }
            },
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use domain::error::FieldErrors;

    fn domain_error(error_kind: DomainErrorKind) -> Error {
        Error(DomainError {
            source: None,
            error_kind,
        })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_errors_are_bad_request_with_details() {
        let mut fields = FieldErrors::new();
        fields.insert(
            "transcript".to_string(),
            vec!["Transcript must be at least 50 characters".to_string()],
        );

        let response = domain_error(DomainErrorKind::Validation(fields)).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "error": "Invalid request",
                "details": { "transcript": ["Transcript must be at least 50 characters"] }
            })
        );
    }

    #[tokio::test]
    async fn not_found_has_error_body() {
        let response = domain_error(DomainErrorKind::Internal(InternalErrorKind::Entity(
            EntityErrorKind::NotFound,
        )))
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Summary not found" })
        );
    }

    #[test]
    fn internal_kinds_map_to_expected_status() {
        let cases = [
            (
                DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid)),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DomainErrorKind::Internal(InternalErrorKind::Entity(
                    EntityErrorKind::DbTransaction,
                )),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainErrorKind::Internal(InternalErrorKind::Config),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainErrorKind::Internal(InternalErrorKind::Other("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (kind, status) in cases {
            assert_eq!(domain_error(kind).into_response().status(), status);
        }
    }

    #[test]
    fn external_kinds_map_to_gateway_statuses() {
        let cases = [
            (
                DomainErrorKind::External(ExternalErrorKind::Network),
                StatusCode::BAD_GATEWAY,
            ),
            (
                DomainErrorKind::External(ExternalErrorKind::Other("bad json".to_string())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                DomainErrorKind::External(ExternalErrorKind::Timeout),
                StatusCode::GATEWAY_TIMEOUT,
            ),
        ];

        for (kind, status) in cases {
            assert_eq!(domain_error(kind).into_response().status(), status);
        }
    }

    #[test]
    fn rate_limited_is_service_unavailable_with_retry_after() {
        let response = domain_error(DomainErrorKind::External(ExternalErrorKind::RateLimited {
            retry_after_seconds: 15,
        }))
        .into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[header::RETRY_AFTER], "15");
    }
}
