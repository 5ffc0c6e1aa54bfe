// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the Course Library API.
// It can be used by both the main API server (for Swagger UI)
// and the export-openapi binary (for static spec generation).

use crate::api;
use courselib_core::{
    AuthorDto, AuthorForCreationDto, CourseDto, CourseForCreationDto, CourseForUpdateDto,
    ValidationProblemDetails,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Course Library API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::authors::list_authors,
        api::authors::get_author,
        api::authors::create_author,
        api::authors::authors_options,
        api::authors::delete_author,
        api::author_collections::get_author_collection,
        api::author_collections::create_author_collection,
        api::courses::list_courses,
        api::courses::get_course,
        api::courses::create_course,
        api::courses::upsert_course,
        api::courses::delete_course,
    ),
    components(
        schemas(
            AuthorDto, AuthorForCreationDto,
            CourseDto, CourseForCreationDto, CourseForUpdateDto,
            ValidationProblemDetails,
        )
    ),
    tags(
        (name = "authors", description = "Author management endpoints"),
        (name = "author-collections", description = "Batch author endpoints"),
        (name = "courses", description = "Course management endpoints, scoped to an author")
    ),
    info(
        title = "Course Library API",
        version = "0.1.0",
        description = "API for managing authors and their courses",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> Result<String, serde_json::Error> {
        Self::openapi().to_pretty_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_author_routes() {
        let json: serde_json::Value = serde_json::from_str(&ApiDoc::to_json().unwrap()).unwrap();

        let paths = &json["paths"];
        assert!(paths.get("/api/authors").is_some());
        assert!(paths.get("/api/authors/{author_id}/courses/{course_id}").is_some());
        assert!(paths.get("/api/authorcollections").is_some());
        assert!(json["components"]["schemas"]
            .get("ValidationProblemDetails")
            .is_some());
    }
}
