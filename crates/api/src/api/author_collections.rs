// Author collection HTTP routes
//
// Batch creation and retrieval of authors by a comma-delimited ID list.

use crate::services::AuthorService;
use crate::storage::StorageBackend;
use axum::{
    extract::{OriginalUri, State},
    response::Response,
    routing::get,
    Router,
};
use courselib_core::{
    binding::join_delimited, AuthorCollectionParameters, AuthorDto, AuthorForCreationDto,
    ModelState,
};
use std::sync::Arc;

use super::common::created;
use super::error::ApiError;
use super::extract::{ModelQuery, ProblemContext, ValidatedJson};
use super::representation::Representation;

pub const IDS_REQUIRED_MESSAGE: &str = "At least one author id is required.";

/// App state for author collection routes
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

/// Create author collection routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/authorcollections",
            get(get_author_collection).post(create_author_collection),
        )
        .with_state(state)
}

/// GET /api/authorcollections - Get several authors by ID
#[utoipa::path(
    get,
    path = "/api/authorcollections",
    params(
        ("ids" = String, Query, description = "Comma-separated author IDs", example = "d28888e9-2ba9-473a-a40f-e38cb54f9b35,da2fd609-d754-4feb-8acd-c4f9ff13ba96")
    ),
    responses(
        (status = 200, description = "Authors in request order (JSON or XML)", body = Vec<AuthorDto>),
        (status = 400, description = "No IDs given", body = courselib_core::ValidationProblemDetails, content_type = "application/problem+json"),
        (status = 404, description = "At least one author does not exist"),
        (status = 422, description = "An ID could not be converted", body = courselib_core::ValidationProblemDetails, content_type = "application/problem+json"),
        (status = 500, description = "Internal server error")
    ),
    tag = "author-collections"
)]
pub async fn get_author_collection(
    State(state): State<AppState>,
    ctx: ProblemContext,
    representation: Representation,
    ModelQuery(params): ModelQuery<AuthorCollectionParameters>,
) -> Result<Response, ApiError> {
    if params.ids.is_empty() {
        let mut errors = ModelState::new();
        errors.add_model_error("ids", IDS_REQUIRED_MESSAGE);
        return Err(ctx.bad_input_error(errors));
    }

    let authors = state
        .service
        .get_many(&params.ids)
        .await?
        .ok_or(ApiError::NotFound)?;

    representation.many(&authors)
}

/// POST /api/authorcollections - Create several authors at once
#[utoipa::path(
    post,
    path = "/api/authorcollections",
    request_body = Vec<AuthorForCreationDto>,
    responses(
        (status = 201, description = "Authors created", body = Vec<AuthorDto>),
        (status = 400, description = "Body is not valid JSON", body = courselib_core::ValidationProblemDetails, content_type = "application/problem+json"),
        (status = 422, description = "Body failed validation", body = courselib_core::ValidationProblemDetails, content_type = "application/problem+json"),
        (status = 500, description = "Internal server error")
    ),
    tag = "author-collections"
)]
pub async fn create_author_collection(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    representation: Representation,
    ValidatedJson(reqs): ValidatedJson<Vec<AuthorForCreationDto>>,
) -> Result<Response, ApiError> {
    let authors = state.service.create_many(reqs).await?;
    tracing::info!(count = authors.len(), "Author collection created");

    let ids = join_delimited(authors.iter().map(|a| a.id));
    let location = format!("{}?ids={}", uri.path(), ids);
    Ok(created(&location, representation.many(&authors)?))
}
