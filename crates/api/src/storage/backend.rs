// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(std::sync::Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL and apply migrations
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        db.migrate().await?;
        Ok(Self::Postgres(db))
    }

    /// Create an empty in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(std::sync::Arc::new(InMemoryDatabase::new()))
    }

    /// Create an in-memory storage backend with sample authors and courses
    pub fn in_memory_with_sample_data() -> Self {
        Self::InMemory(std::sync::Arc::new(InMemoryDatabase::with_sample_data()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    // ============================================
    // Authors
    // ============================================

    pub async fn create_author(&self, input: CreateAuthorRow) -> Result<AuthorRow> {
        match self {
            Self::Postgres(db) => db.create_author(input).await,
            Self::InMemory(db) => db.create_author(input).await,
        }
    }

    pub async fn create_authors(&self, inputs: Vec<CreateAuthorRow>) -> Result<Vec<AuthorRow>> {
        match self {
            Self::Postgres(db) => db.create_authors(inputs).await,
            Self::InMemory(db) => db.create_authors(inputs).await,
        }
    }

    pub async fn get_author(&self, id: Uuid) -> Result<Option<AuthorRow>> {
        match self {
            Self::Postgres(db) => db.get_author(id).await,
            Self::InMemory(db) => db.get_author(id).await,
        }
    }

    pub async fn author_exists(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.author_exists(id).await,
            Self::InMemory(db) => db.author_exists(id).await,
        }
    }

    pub async fn list_authors(&self, filter: &AuthorFilter) -> Result<Vec<AuthorRow>> {
        match self {
            Self::Postgres(db) => db.list_authors(filter).await,
            Self::InMemory(db) => db.list_authors(filter).await,
        }
    }

    pub async fn get_authors_by_ids(&self, ids: &[Uuid]) -> Result<Vec<AuthorRow>> {
        match self {
            Self::Postgres(db) => db.get_authors_by_ids(ids).await,
            Self::InMemory(db) => db.get_authors_by_ids(ids).await,
        }
    }

    pub async fn delete_author(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_author(id).await,
            Self::InMemory(db) => db.delete_author(id).await,
        }
    }

    // ============================================
    // Courses
    // ============================================

    pub async fn create_course(&self, author_id: Uuid, input: CreateCourseRow) -> Result<CourseRow> {
        match self {
            Self::Postgres(db) => db.create_course(author_id, input).await,
            Self::InMemory(db) => db.create_course(author_id, input).await,
        }
    }

    pub async fn get_course(&self, author_id: Uuid, course_id: Uuid) -> Result<Option<CourseRow>> {
        match self {
            Self::Postgres(db) => db.get_course(author_id, course_id).await,
            Self::InMemory(db) => db.get_course(author_id, course_id).await,
        }
    }

    pub async fn list_courses(&self, author_id: Uuid) -> Result<Vec<CourseRow>> {
        match self {
            Self::Postgres(db) => db.list_courses(author_id).await,
            Self::InMemory(db) => db.list_courses(author_id).await,
        }
    }

    pub async fn update_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
        input: UpdateCourse,
    ) -> Result<Option<CourseRow>> {
        match self {
            Self::Postgres(db) => db.update_course(author_id, course_id, input).await,
            Self::InMemory(db) => db.update_course(author_id, course_id, input).await,
        }
    }

    pub async fn delete_course(&self, author_id: Uuid, course_id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_course(author_id, course_id).await,
            Self::InMemory(db) => db.delete_course(author_id, course_id).await,
        }
    }
}
