// Request extractors
//
// ModelQuery drives the query binder; ValidatedJson deserializes then validates a body.
// Both reject with the problem-details envelope carrying the request's trace id and path.

use async_trait::async_trait;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, OriginalUri, Path, Request,
    },
    http::{request::Parts, Extensions, HeaderMap, Uri},
    Json,
};
use courselib_core::{
    bind_query,
    problem::{ValidationProblemDetails, VALIDATION_PROBLEM_TYPE},
    BindQueryModel, ModelState, Validate,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::ApiError;
use super::middleware::REQUEST_ID_HEADER;

/// Key under which unreadable bodies are reported.
pub const BODY_ERROR_KEY: &str = "body";

/// Trace id and path used to fill a problem-details envelope.
#[derive(Debug, Clone)]
pub struct ProblemContext {
    pub trace_id: String,
    pub instance: String,
}

impl ProblemContext {
    fn new(uri: &Uri, headers: &HeaderMap, extensions: &Extensions) -> Self {
        let trace_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::now_v7().to_string());

        // Nested routers see a stripped URI; report the path the client sent.
        let instance = extensions
            .get::<OriginalUri>()
            .map(|original| original.0.path().to_string())
            .unwrap_or_else(|| uri.path().to_string());

        Self { trace_id, instance }
    }

    pub fn from_parts(parts: &Parts) -> Self {
        Self::new(&parts.uri, &parts.headers, &parts.extensions)
    }

    pub fn from_request(req: &Request) -> Self {
        Self::new(req.uri(), req.headers(), req.extensions())
    }

    /// 422 error carrying `errors`.
    pub fn validation_error(self, errors: ModelState) -> ApiError {
        ApiError::validation(ValidationProblemDetails::validation(
            VALIDATION_PROBLEM_TYPE,
            self.trace_id,
            self.instance,
            errors,
        ))
    }

    /// 400 error carrying `errors`.
    pub fn bad_input_error(self, errors: ModelState) -> ApiError {
        ApiError::bad_input(ValidationProblemDetails::bad_input(
            self.trace_id,
            self.instance,
            errors,
        ))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ProblemContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Path parameters of a resource route.
///
/// A segment that does not parse as the declared type addresses no resource,
/// so it is answered with 404 rather than a parser message.
#[derive(Debug, Clone)]
pub struct ResourcePath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ResourcePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(PathRejection::FailedToDeserializePathParams(rejection)) => {
                tracing::debug!(path = %parts.uri.path(), "Unmatched path parameter: {}", rejection.body_text());
                Err(ApiError::NotFound)
            }
            Err(rejection) => Err(ApiError::Internal(anyhow::anyhow!(
                "path parameters unavailable: {}",
                rejection.body_text()
            ))),
        }
    }
}

/// Query model bound from the request's query string.
///
/// Any conversion failure rejects the request with a 422 envelope listing
/// every failing parameter.
#[derive(Debug, Clone)]
pub struct ModelQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ModelQuery<T>
where
    S: Send + Sync,
    T: BindQueryModel + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match bind_query::<T>(parts.uri.query()) {
            Ok(model) => Ok(Self(model)),
            Err(errors) => {
                let ctx = ProblemContext::from_parts(parts);
                tracing::warn!(
                    path = %ctx.instance,
                    trace_id = %ctx.trace_id,
                    parameters = ?errors.keys().collect::<Vec<_>>(),
                    "Query binding failed"
                );
                Err(ctx.validation_error(errors))
            }
        }
    }
}

/// JSON body that passed [`Validate`].
///
/// Unparseable JSON is a 400 envelope; a parsed body breaking validation
/// rules is a 422 envelope.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ctx = ProblemContext::from_request(&req);

        let value = match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => value,
            Err(JsonRejection::MissingJsonContentType(rejection)) => {
                return Err(ApiError::Rejected(rejection.into()));
            }
            Err(rejection) => {
                tracing::warn!(path = %ctx.instance, "Unreadable request body: {}", rejection.body_text());
                let mut errors = ModelState::new();
                errors.add_model_error(BODY_ERROR_KEY, rejection.body_text());
                return Err(ctx.bad_input_error(errors));
            }
        };

        let errors = value.validate();
        if !errors.is_valid() {
            tracing::warn!(
                path = %ctx.instance,
                trace_id = %ctx.trace_id,
                errors = errors.error_count(),
                "Request body failed validation"
            );
            return Err(ctx.validation_error(errors));
        }

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header;
    use courselib_core::{AuthorsResourceParameters, CourseForCreationDto};

    fn parts(uri: &str, request_id: Option<&str>) -> Parts {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(id) = request_id {
            builder = builder.header(REQUEST_ID_HEADER, id);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_model_query_binds() {
        let mut parts = parts("/api/authors?ids=3fa85f64-5717-4562-b3fc-2c963f66afa6", None);
        let ModelQuery(params) =
            ModelQuery::<AuthorsResourceParameters>::from_request_parts(&mut parts, &())
                .await
                .unwrap();
        assert_eq!(params.ids.len(), 1);
    }

    #[tokio::test]
    async fn test_model_query_rejects_with_trace_id() {
        let mut parts = parts("/api/authors?ids=1,two", Some("trace-abc"));
        let err = ModelQuery::<AuthorsResourceParameters>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();

        match err {
            ApiError::Validation(problem) => {
                assert_eq!(problem.status, 422);
                assert_eq!(problem.trace_id, "trace-abc");
                assert_eq!(problem.instance, "/api/authors");
                assert!(problem.errors.contains_key("ids"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_trace_id_generated_when_header_missing() {
        let ctx = ProblemContext::from_parts(&parts("/api/authors", None));
        assert!(Uuid::parse_str(&ctx.trace_id).is_ok());
    }

    fn json_request(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/api/authors/x/courses")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_validated_json_accepts_valid_body() {
        let req = json_request(r#"{"title":"Pirate knots","description":"Tying them"}"#);
        let ValidatedJson(course) = ValidatedJson::<CourseForCreationDto>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(course.title, "Pirate knots");
    }

    #[tokio::test]
    async fn test_validated_json_rule_violation_is_422() {
        let req = json_request(r#"{"title":"Same","description":"Same"}"#);
        let err = ValidatedJson::<CourseForCreationDto>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_validated_json_syntax_error_is_400() {
        let req = json_request(r#"{"title": "#);
        let err = ValidatedJson::<CourseForCreationDto>::from_request(req, &())
            .await
            .unwrap_err();
        match err {
            ApiError::BadInput(problem) => {
                assert_eq!(problem.status, 400);
                assert!(problem.errors.contains_key(BODY_ERROR_KEY));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn resource_router() -> axum::Router {
        axum::Router::new().route(
            "/api/authors/:author_id",
            axum::routing::get(|ResourcePath(id): ResourcePath<Uuid>| async move { id.to_string() }),
        )
    }

    async fn get_status(uri: &str) -> axum::http::StatusCode {
        use tower::ServiceExt;

        let request = axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        resource_router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_resource_path_parses_uuid() {
        let status = get_status("/api/authors/d28888e9-2ba9-473a-a40f-e38cb54f9b35").await;
        assert_eq!(status, axum::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_resource_path_non_uuid_is_not_found() {
        let status = get_status("/api/authors/not-a-guid").await;
        assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    }
}
