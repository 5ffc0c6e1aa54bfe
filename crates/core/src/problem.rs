// Problem details envelope
//
// Structured error body shared by every model-state failure on the request path.
// Content type: application/problem+json

use serde::{Deserialize, Serialize};

use crate::binding::ModelState;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Problem category for semantic validation failures.
pub const VALIDATION_PROBLEM_TYPE: &str = "https://courselibrary.com/modelvalidationproblem";

/// Problem category for input that could not be read at all (malformed body).
pub const INPUT_PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc7231#section-6.5.1";

pub const VALIDATION_PROBLEM_TITLE: &str = "One or more validation errors occured.";
pub const INPUT_PROBLEM_TITLE: &str = "One or more errors on input occured.";
pub const PROBLEM_DETAIL: &str = "See the error property for details";

pub const PROBLEM_JSON_CONTENT_TYPE: &str = "application/problem+json";

/// Validation problem details body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ValidationProblemDetails {
    /// URI identifying the problem category.
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    /// HTTP status code of the response carrying this body.
    pub status: u16,
    pub detail: String,
    /// Request path that produced the problem.
    pub instance: String,
    /// Errors keyed by parameter or property name.
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub errors: ModelState,
    /// Correlation identifier of the request.
    pub trace_id: String,
}

impl ValidationProblemDetails {
    /// 422 envelope for a request whose input parsed but did not validate.
    pub fn validation(
        type_uri: &str,
        trace_id: impl Into<String>,
        instance: impl Into<String>,
        errors: ModelState,
    ) -> Self {
        Self {
            problem_type: type_uri.to_string(),
            title: VALIDATION_PROBLEM_TITLE.to_string(),
            status: 422,
            detail: PROBLEM_DETAIL.to_string(),
            instance: instance.into(),
            errors,
            trace_id: trace_id.into(),
        }
    }

    /// 400 envelope for input that could not be parsed.
    pub fn bad_input(
        trace_id: impl Into<String>,
        instance: impl Into<String>,
        errors: ModelState,
    ) -> Self {
        Self {
            problem_type: INPUT_PROBLEM_TYPE.to_string(),
            title: INPUT_PROBLEM_TITLE.to_string(),
            status: 400,
            detail: PROBLEM_DETAIL.to_string(),
            instance: instance.into(),
            errors,
            trace_id: trace_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_envelope_fields() {
        let mut errors = ModelState::new();
        errors.add_model_error("ids", "The value 'two' is not valid for ids.");

        let problem = ValidationProblemDetails::validation(
            VALIDATION_PROBLEM_TYPE,
            "0190c8e4-trace",
            "/api/authors",
            errors,
        );
        let json = serde_json::to_value(&problem).unwrap();

        assert_eq!(json["type"], VALIDATION_PROBLEM_TYPE);
        assert_eq!(json["title"], "One or more validation errors occured.");
        assert_eq!(json["status"], 422);
        assert_eq!(json["detail"], "See the error property for details");
        assert_eq!(json["instance"], "/api/authors");
        assert_eq!(json["traceId"], "0190c8e4-trace");
        assert_eq!(json["errors"]["ids"][0], "The value 'two' is not valid for ids.");
    }

    #[test]
    fn test_bad_input_envelope() {
        let problem = ValidationProblemDetails::bad_input("t", "/api/authors", ModelState::new());
        assert_eq!(problem.status, 400);
        assert_eq!(problem.title, INPUT_PROBLEM_TITLE);
        assert_eq!(problem.problem_type, INPUT_PROBLEM_TYPE);
    }
}
