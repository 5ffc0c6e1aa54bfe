// Common response helpers shared across resource routes

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::Response,
};

/// Turn a rendered resource into `201 Created` with a `Location` header.
pub fn created(location: &str, mut response: Response) -> Response {
    *response.status_mut() = StatusCode::CREATED;
    match HeaderValue::from_str(location) {
        Ok(location) => {
            response.headers_mut().insert(header::LOCATION, location);
        }
        Err(e) => tracing::warn!("Omitting invalid Location header {:?}: {}", location, e),
    }
    response
}

/// Path of a child resource below `collection_path`.
pub fn child_path(collection_path: &str, id: impl std::fmt::Display) -> String {
    format!("{}/{}", collection_path.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{response::IntoResponse, Json};

    #[test]
    fn test_child_path() {
        assert_eq!(child_path("/api/authors", 7), "/api/authors/7");
        assert_eq!(child_path("/api/authors/", "x"), "/api/authors/x");
    }

    #[test]
    fn test_created_sets_location() {
        let body = Json(serde_json::json!({"id": 1})).into_response();
        let response = created("/api/authors/1", body);
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/api/authors/1");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_created_omits_invalid_location() {
        let response = created("/api/authors/\n1\n", StatusCode::OK.into_response());
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.headers().get(header::LOCATION).is_none());
    }
}
