// Course domain types
//
// Response and manipulation DTOs for courses owned by an author.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Course as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ID of the author that owns the course.
    pub author_id: Uuid,
}

/// Request body for creating a course.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CourseForCreationDto {
    /// Course title (required, at most 100 characters).
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Commandeering a Ship Without Getting Caught"))]
    pub title: String,
    /// Optional description (at most 1500 characters).
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for replacing a course. Unlike creation, a description is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CourseForUpdateDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}
