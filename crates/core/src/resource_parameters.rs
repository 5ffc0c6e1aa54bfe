// Query models for list endpoints

use uuid::Uuid;

use crate::binding::{BindQueryModel, BindingContext};

/// Filters for `GET /api/authors`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorsResourceParameters {
    /// Exact main category match (case-insensitive).
    pub main_category: Option<String>,
    /// Substring searched in main category, first and last name.
    pub search_query: Option<String>,
    /// Restrict to these author IDs; empty means no ID filter.
    pub ids: Vec<Uuid>,
}

impl BindQueryModel for AuthorsResourceParameters {
    fn bind_from(ctx: &mut BindingContext<'_>) -> Self {
        Self {
            main_category: ctx.bind_value("mainCategory"),
            search_query: ctx.bind_value("searchQuery"),
            ids: ctx.bind_delimited("ids"),
        }
    }
}

/// Identifiers for `GET /api/authorcollections`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorCollectionParameters {
    pub ids: Vec<Uuid>,
}

impl BindQueryModel for AuthorCollectionParameters {
    fn bind_from(ctx: &mut BindingContext<'_>) -> Self {
        Self {
            ids: ctx.bind_delimited("ids"),
        }
    }
}
