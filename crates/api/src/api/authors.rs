// Author HTTP routes

use crate::services::AuthorService;
use crate::storage::StorageBackend;
use axum::{
    extract::{OriginalUri, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use courselib_core::{AuthorDto, AuthorForCreationDto, AuthorsResourceParameters};
use std::sync::Arc;
use uuid::Uuid;

use super::common::{child_path, created};
use super::error::ApiError;
use super::extract::{ModelQuery, ResourcePath, ValidatedJson};
use super::representation::Representation;

/// Methods advertised by `OPTIONS /api/authors`.
pub const AUTHORS_ALLOW: &str = "GET,OPTIONS,POST";

/// App state for authors routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AuthorService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            service: Arc::new(AuthorService::new(db)),
        }
    }
}

/// Create author routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/authors",
            get(list_authors)
                .post(create_author)
                .options(authors_options),
        )
        .route("/api/authors/:author_id", get(get_author).delete(delete_author))
        .with_state(state)
}

/// GET /api/authors - List authors, optionally filtered
#[utoipa::path(
    get,
    path = "/api/authors",
    params(
        ("mainCategory" = Option<String>, Query, description = "Exact main category (case-insensitive)"),
        ("searchQuery" = Option<String>, Query, description = "Substring of main category, first or last name"),
        ("ids" = Option<String>, Query, description = "Comma-separated author IDs", example = "d28888e9-2ba9-473a-a40f-e38cb54f9b35,da2fd609-d754-4feb-8acd-c4f9ff13ba96")
    ),
    responses(
        (status = 200, description = "List of authors (JSON or XML)", body = Vec<AuthorDto>),
        (status = 422, description = "A query parameter could not be converted", body = courselib_core::ValidationProblemDetails, content_type = "application/problem+json"),
        (status = 500, description = "Internal server error")
    ),
    tag = "authors"
)]
pub async fn list_authors(
    State(state): State<AppState>,
    representation: Representation,
    ModelQuery(params): ModelQuery<AuthorsResourceParameters>,
) -> Result<Response, ApiError> {
    let authors = state.service.list(params).await?;
    representation.many(&authors)
}

/// GET /api/authors/{author_id} - Get author by ID
#[utoipa::path(
    get,
    path = "/api/authors/{author_id}",
    params(
        ("author_id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author found (JSON or XML)", body = AuthorDto),
        (status = 404, description = "Author not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "authors"
)]
pub async fn get_author(
    State(state): State<AppState>,
    representation: Representation,
    ResourcePath(author_id): ResourcePath<Uuid>,
) -> Result<Response, ApiError> {
    let author = state
        .service
        .get(author_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    representation.one(&author)
}

/// POST /api/authors - Create an author with optional courses
#[utoipa::path(
    post,
    path = "/api/authors",
    request_body = AuthorForCreationDto,
    responses(
        (status = 201, description = "Author created", body = AuthorDto),
        (status = 400, description = "Body is not valid JSON", body = courselib_core::ValidationProblemDetails, content_type = "application/problem+json"),
        (status = 422, description = "Body failed validation", body = courselib_core::ValidationProblemDetails, content_type = "application/problem+json"),
        (status = 500, description = "Internal server error")
    ),
    tag = "authors"
)]
pub async fn create_author(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    representation: Representation,
    ValidatedJson(req): ValidatedJson<AuthorForCreationDto>,
) -> Result<Response, ApiError> {
    let author = state.service.create(req).await?;

    let location = child_path(uri.path(), author.id);
    Ok(created(&location, representation.one(&author)?))
}

/// OPTIONS /api/authors - Advertise supported methods
#[utoipa::path(
    options,
    path = "/api/authors",
    responses(
        (status = 200, description = "Supported methods in the Allow header")
    ),
    tag = "authors"
)]
pub async fn authors_options() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, AUTHORS_ALLOW)])
}

/// DELETE /api/authors/{author_id} - Delete an author and its courses
#[utoipa::path(
    delete,
    path = "/api/authors/{author_id}",
    params(
        ("author_id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "authors"
)]
pub async fn delete_author(
    State(state): State<AppState>,
    ResourcePath(author_id): ResourcePath<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.service.delete(author_id).await? {
        tracing::info!(author_id = %author_id, "Author deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
