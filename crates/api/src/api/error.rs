// API error type and its HTTP mapping
//
// Decision: Model-state failures are answered with problem details, never a bare status
// Decision: Internal faults are logged and hidden behind a fixed message

use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use courselib_core::problem::{ValidationProblemDetails, PROBLEM_JSON_CONTENT_TYPE};
use thiserror::Error;

/// Body returned for any unexpected server-side fault.
pub const UNEXPECTED_FAULT_MESSAGE: &str = "An unexpected fault happened. Try again later";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Input was readable but failed binding or validation (422).
    #[error("request validation failed")]
    Validation(Box<ValidationProblemDetails>),

    /// Input could not be read at all (400).
    #[error("request input could not be read")]
    BadInput(Box<ValidationProblemDetails>),

    #[error("resource not found")]
    NotFound,

    /// Body rejected before deserialization, e.g. a missing JSON content type.
    #[error(transparent)]
    Rejected(JsonRejection),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(problem: ValidationProblemDetails) -> Self {
        Self::Validation(Box::new(problem))
    }

    pub fn bad_input(problem: ValidationProblemDetails) -> Self {
        Self::BadInput(Box::new(problem))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(problem) => {
                problem_response(StatusCode::UNPROCESSABLE_ENTITY, *problem)
            }
            Self::BadInput(problem) => problem_response(StatusCode::BAD_REQUEST, *problem),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Rejected(rejection) => rejection.into_response(),
            Self::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_FAULT_MESSAGE).into_response()
            }
        }
    }
}

fn problem_response(fallback: StatusCode, problem: ValidationProblemDetails) -> Response {
    let status = StatusCode::from_u16(problem.status).unwrap_or(fallback);
    (
        status,
        [(header::CONTENT_TYPE, PROBLEM_JSON_CONTENT_TYPE)],
        Json(problem),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use courselib_core::problem::VALIDATION_PROBLEM_TYPE;
    use courselib_core::ModelState;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_validation_maps_to_422_problem_json() {
        let mut errors = ModelState::new();
        errors.add_model_error("ids", "The value 'two' is not valid for ids.");
        let problem =
            ValidationProblemDetails::validation(VALIDATION_PROBLEM_TYPE, "t-1", "/api/authors", errors);

        let response = ApiError::validation(problem).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            PROBLEM_JSON_CONTENT_TYPE
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["traceId"], "t-1");
        assert_eq!(json["errors"]["ids"][0], "The value 'two' is not valid for ids.");
    }

    #[tokio::test]
    async fn test_internal_hides_details() {
        let response = ApiError::from(anyhow::anyhow!("connection refused")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], UNEXPECTED_FAULT_MESSAGE.as_bytes());
    }

    #[test]
    fn test_not_found() {
        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
    }
}
