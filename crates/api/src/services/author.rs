// Author service for business logic

use crate::storage::{
    models::{AuthorFilter, CreateAuthorRow, CreateCourseRow},
    AuthorRow, StorageBackend,
};
use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use courselib_core::{
    current_age, full_name, AuthorDto, AuthorForCreationDto, AuthorsResourceParameters,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub struct AuthorService {
    db: Arc<StorageBackend>,
}

impl AuthorService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn list(&self, params: AuthorsResourceParameters) -> Result<Vec<AuthorDto>> {
        let filter = AuthorFilter {
            main_category: non_blank(params.main_category),
            search_query: non_blank(params.search_query),
            ids: params.ids,
        };
        tracing::debug!(
            main_category = ?filter.main_category,
            search_query = ?filter.search_query,
            ids = filter.ids.len(),
            "Listing authors"
        );

        let rows = self.db.list_authors(&filter).await?;
        let today = Utc::now().date_naive();
        Ok(rows.into_iter().map(|row| Self::row_to_author(row, today)).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<AuthorDto>> {
        let row = self.db.get_author(id).await?;
        Ok(row.map(|row| Self::row_to_author(row, Utc::now().date_naive())))
    }

    /// Authors for every requested ID, in request order.
    /// Returns `None` when any ID is unknown.
    pub async fn get_many(&self, ids: &[Uuid]) -> Result<Option<Vec<AuthorDto>>> {
        let rows = self.db.get_authors_by_ids(ids).await?;
        let by_id: HashMap<Uuid, AuthorRow> = rows.into_iter().map(|r| (r.id, r)).collect();

        let today = Utc::now().date_naive();
        let mut authors = Vec::with_capacity(ids.len());
        for id in ids {
            // Duplicated IDs repeat the same author.
            let row = match by_id.get(id) {
                Some(row) => row.clone(),
                None => return Ok(None),
            };
            authors.push(Self::row_to_author(row, today));
        }
        Ok(Some(authors))
    }

    /// Create an author together with its nested courses.
    /// The request must already have passed validation.
    pub async fn create(&self, req: AuthorForCreationDto) -> Result<AuthorDto> {
        let row = self.db.create_author(Self::creation_row(req)?).await?;
        tracing::info!(author_id = %row.id, "Author created");

        Ok(Self::row_to_author(row, Utc::now().date_naive()))
    }

    /// Create all authors or none of them.
    pub async fn create_many(&self, reqs: Vec<AuthorForCreationDto>) -> Result<Vec<AuthorDto>> {
        let inputs = reqs
            .into_iter()
            .map(Self::creation_row)
            .collect::<Result<Vec<_>>>()?;
        let rows = self.db.create_authors(inputs).await?;

        let today = Utc::now().date_naive();
        Ok(rows.into_iter().map(|row| Self::row_to_author(row, today)).collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        self.db.delete_author(id).await
    }

    fn creation_row(req: AuthorForCreationDto) -> Result<CreateAuthorRow> {
        let date_of_birth = req
            .date_of_birth
            .ok_or_else(|| anyhow!("Author creation requires a date of birth"))?;

        Ok(CreateAuthorRow {
            first_name: req.first_name,
            last_name: req.last_name,
            date_of_birth,
            main_category: req.main_category,
            courses: req
                .courses
                .into_iter()
                .map(|c| CreateCourseRow {
                    id: None,
                    title: c.title,
                    description: c.description,
                })
                .collect(),
        })
    }

    fn row_to_author(row: AuthorRow, today: NaiveDate) -> AuthorDto {
        AuthorDto {
            id: row.id,
            name: full_name(&row.first_name, &row.last_name),
            age: current_age(row.date_of_birth, today),
            main_category: row.main_category,
        }
    }
}

/// Trimmed filter value, or `None` when nothing is left.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use courselib_core::CourseForCreationDto;

    fn service() -> AuthorService {
        AuthorService::new(Arc::new(StorageBackend::in_memory_with_sample_data()))
    }

    fn new_author(first: &str) -> AuthorForCreationDto {
        AuthorForCreationDto {
            first_name: first.to_string(),
            last_name: "Kidd".to_string(),
            date_of_birth: Some(Utc.with_ymd_and_hms(1990, 6, 1, 0, 0, 0).unwrap()),
            main_category: "Maps".to_string(),
            courses: vec![CourseForCreationDto {
                title: "Reading treasure maps".to_string(),
                description: None,
            }],
        }
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Rum ".to_string())).as_deref(), Some("Rum"));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }

    #[tokio::test]
    async fn test_list_trims_filters() {
        let authors = service()
            .list(AuthorsResourceParameters {
                main_category: Some("  Rum  ".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].name, "Nancy Swashbuckler Rye");
    }

    #[tokio::test]
    async fn test_get_many_preserves_request_order() {
        let service = service();
        let created_a = service.create(new_author("William")).await.unwrap();
        let created_b = service.create(new_author("Anne")).await.unwrap();

        let authors = service
            .get_many(&[created_b.id, created_a.id])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(authors[0].id, created_b.id);
        assert_eq!(authors[1].id, created_a.id);
    }

    #[tokio::test]
    async fn test_get_many_unknown_id() {
        let service = service();
        let created = service.create(new_author("William")).await.unwrap();

        let result = service.get_many(&[created.id, Uuid::now_v7()]).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_create_requires_date_of_birth() {
        let mut req = new_author("William");
        req.date_of_birth = None;

        assert!(service().create(req).await.is_err());
    }

    #[tokio::test]
    async fn test_create_many_stores_nothing_when_one_fails() {
        let service = service();
        let mut incomplete = new_author("Mary");
        incomplete.date_of_birth = None;

        let result = service
            .create_many(vec![new_author("Anne"), incomplete])
            .await;
        assert!(result.is_err());

        let authors = service.list(AuthorsResourceParameters::default()).await.unwrap();
        assert_eq!(authors.len(), 4);
    }

    #[tokio::test]
    async fn test_create_many_keeps_request_order() {
        let service = service();
        let authors = service
            .create_many(vec![new_author("William"), new_author("Anne")])
            .await
            .unwrap();

        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].name, "William Kidd");
        assert_eq!(authors[1].name, "Anne Kidd");
    }
}
