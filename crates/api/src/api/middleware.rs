// HTTP middleware: request ids, content negotiation, panic recovery
//
// Decision: Request ids are UUID v7 so trace ids sort by arrival time
// Decision: Requests accepting neither JSON nor XML are answered 406

use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use uuid::Uuid;

use super::error::UNEXPECTED_FAULT_MESSAGE;
use super::representation::Representation;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates `x-request-id` values for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let header_value = HeaderValue::from_str(&Uuid::now_v7().to_string()).ok()?;
        Some(RequestId::new(header_value))
    }
}

/// Create request ID layer
pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuidV7> {
    SetRequestIdLayer::x_request_id(MakeRequestUuidV7)
}

/// Create request ID propagation layer
pub fn request_id_propagation_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Reject requests whose `Accept` header admits no representation we serve.
pub async fn require_acceptable_representation(req: Request, next: Next) -> Response {
    if Representation::negotiate(req.headers()).is_none() {
        tracing::debug!(
            accept = ?req.headers().get(header::ACCEPT),
            "Rejecting request with unsupported Accept header"
        );
        return StatusCode::NOT_ACCEPTABLE.into_response();
    }
    next.run(req).await
}

/// Response for a panicking handler, used with `CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Request handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_FAULT_MESSAGE).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_request_id_is_uuid() {
        let request = axum::http::Request::builder().body(()).unwrap();
        let id = MakeRequestUuidV7.make_request_id(&request).unwrap();
        let value = id.header_value().to_str().unwrap();
        assert_eq!(Uuid::parse_str(value).unwrap().get_version_num(), 7);
    }

    #[tokio::test]
    async fn test_panic_response_is_fixed_message() {
        use http_body_util::BodyExt;

        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], UNEXPECTED_FAULT_MESSAGE.as_bytes());
    }
}
