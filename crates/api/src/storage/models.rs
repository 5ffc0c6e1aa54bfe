// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Authors
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct AuthorRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub main_category: String,
}

#[derive(Debug, Clone)]
pub struct CreateAuthorRow {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub main_category: String,
    pub courses: Vec<CreateCourseRow>,
}

/// Author list filters, already trimmed. Empty `ids` means no ID filter.
#[derive(Debug, Clone, Default)]
pub struct AuthorFilter {
    pub main_category: Option<String>,
    pub search_query: Option<String>,
    pub ids: Vec<Uuid>,
}

impl AuthorFilter {
    /// In-memory evaluation of the filter, mirroring the Postgres WHERE clause.
    pub fn matches(&self, row: &AuthorRow) -> bool {
        if let Some(category) = &self.main_category {
            if !row.main_category.eq_ignore_ascii_case(category) {
                return false;
            }
        }

        if let Some(search) = &self.search_query {
            let needle = search.to_lowercase();
            let found = [&row.main_category, &row.first_name, &row.last_name]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }

        self.ids.is_empty() || self.ids.contains(&row.id)
    }
}

// ============================================
// Courses
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct CourseRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateCourseRow {
    /// Client-chosen ID (PUT upsert); generated when `None`.
    pub id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateCourse {
    pub title: String,
    pub description: Option<String>,
}
