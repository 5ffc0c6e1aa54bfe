// Course HTTP routes, nested under an author

use crate::services::{CourseService, Upserted};
use crate::storage::StorageBackend;
use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use courselib_core::{CourseDto, CourseForCreationDto, CourseForUpdateDto};
use std::sync::Arc;
use uuid::Uuid;

use super::common::{child_path, created};
use super::error::ApiError;
use super::extract::{ResourcePath, ValidatedJson};
use super::representation::Representation;

/// App state for courses routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CourseService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            service: Arc::new(CourseService::new(db)),
        }
    }
}

/// Create course routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/authors/:author_id/courses",
            get(list_courses).post(create_course),
        )
        .route(
            "/api/authors/:author_id/courses/:course_id",
            get(get_course).put(upsert_course).delete(delete_course),
        )
        .with_state(state)
}

/// GET /api/authors/{author_id}/courses - List an author's courses
#[utoipa::path(
    get,
    path = "/api/authors/{author_id}/courses",
    params(
        ("author_id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Courses of the author (JSON or XML)", body = Vec<CourseDto>),
        (status = 404, description = "Author not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
    representation: Representation,
    ResourcePath(author_id): ResourcePath<Uuid>,
) -> Result<Response, ApiError> {
    let courses = state
        .service
        .list(author_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    representation.many(&courses)
}

/// GET /api/authors/{author_id}/courses/{course_id} - Get one course
#[utoipa::path(
    get,
    path = "/api/authors/{author_id}/courses/{course_id}",
    params(
        ("author_id" = Uuid, Path, description = "Author ID"),
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found (JSON or XML)", body = CourseDto),
        (status = 404, description = "Author or course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    representation: Representation,
    ResourcePath((author_id, course_id)): ResourcePath<(Uuid, Uuid)>,
) -> Result<Response, ApiError> {
    let course = state
        .service
        .get(author_id, course_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    representation.one(&course)
}

/// POST /api/authors/{author_id}/courses - Create a course
#[utoipa::path(
    post,
    path = "/api/authors/{author_id}/courses",
    params(
        ("author_id" = Uuid, Path, description = "Author ID")
    ),
    request_body = CourseForCreationDto,
    responses(
        (status = 201, description = "Course created", body = CourseDto),
        (status = 404, description = "Author not found"),
        (status = 422, description = "Body failed validation", body = courselib_core::ValidationProblemDetails, content_type = "application/problem+json"),
        (status = 500, description = "Internal server error")
    ),
    tag = "courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    ResourcePath(author_id): ResourcePath<Uuid>,
    OriginalUri(uri): OriginalUri,
    representation: Representation,
    ValidatedJson(req): ValidatedJson<CourseForCreationDto>,
) -> Result<Response, ApiError> {
    let course = state
        .service
        .create(author_id, req)
        .await?
        .ok_or(ApiError::NotFound)?;

    let location = child_path(uri.path(), course.id);
    Ok(created(&location, representation.one(&course)?))
}

/// PUT /api/authors/{author_id}/courses/{course_id} - Replace or create a course
#[utoipa::path(
    put,
    path = "/api/authors/{author_id}/courses/{course_id}",
    params(
        ("author_id" = Uuid, Path, description = "Author ID"),
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    request_body = CourseForUpdateDto,
    responses(
        (status = 201, description = "Course created with the given ID", body = CourseDto),
        (status = 204, description = "Course replaced"),
        (status = 404, description = "Author not found"),
        (status = 422, description = "Body failed validation", body = courselib_core::ValidationProblemDetails, content_type = "application/problem+json"),
        (status = 500, description = "Internal server error")
    ),
    tag = "courses"
)]
pub async fn upsert_course(
    State(state): State<AppState>,
    ResourcePath((author_id, course_id)): ResourcePath<(Uuid, Uuid)>,
    OriginalUri(uri): OriginalUri,
    representation: Representation,
    ValidatedJson(req): ValidatedJson<CourseForUpdateDto>,
) -> Result<Response, ApiError> {
    let outcome = state
        .service
        .upsert(author_id, course_id, req)
        .await?
        .ok_or(ApiError::NotFound)?;

    match outcome {
        Upserted::Updated => Ok(StatusCode::NO_CONTENT.into_response()),
        Upserted::Created(course) => Ok(created(uri.path(), representation.one(&course)?)),
    }
}

/// DELETE /api/authors/{author_id}/courses/{course_id} - Delete a course
#[utoipa::path(
    delete,
    path = "/api/authors/{author_id}/courses/{course_id}",
    params(
        ("author_id" = Uuid, Path, description = "Author ID"),
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Author or course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    ResourcePath((author_id, course_id)): ResourcePath<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    if state.service.delete(author_id, course_id).await? {
        tracing::info!(author_id = %author_id, course_id = %course_id, "Course deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
