// Course service for business logic
// Decision: Every operation is scoped to an author; an unknown author yields None

use crate::storage::{
    models::{CreateCourseRow, UpdateCourse},
    CourseRow, StorageBackend,
};
use anyhow::Result;
use courselib_core::{CourseDto, CourseForCreationDto, CourseForUpdateDto};
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of a PUT on a course resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upserted {
    /// The course existed and was replaced.
    Updated,
    /// No course had the ID, so one was created with it.
    Created(CourseDto),
}

pub struct CourseService {
    db: Arc<StorageBackend>,
}

impl CourseService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn list(&self, author_id: Uuid) -> Result<Option<Vec<CourseDto>>> {
        if !self.db.author_exists(author_id).await? {
            return Ok(None);
        }

        let rows = self.db.list_courses(author_id).await?;
        Ok(Some(rows.into_iter().map(Self::row_to_course).collect()))
    }

    pub async fn get(&self, author_id: Uuid, course_id: Uuid) -> Result<Option<CourseDto>> {
        let row = self.db.get_course(author_id, course_id).await?;
        Ok(row.map(Self::row_to_course))
    }

    pub async fn create(
        &self,
        author_id: Uuid,
        req: CourseForCreationDto,
    ) -> Result<Option<CourseDto>> {
        if !self.db.author_exists(author_id).await? {
            return Ok(None);
        }

        let input = CreateCourseRow {
            id: None,
            title: req.title,
            description: req.description,
        };
        let row = self.db.create_course(author_id, input).await?;
        tracing::info!(author_id = %author_id, course_id = %row.id, "Course created");

        Ok(Some(Self::row_to_course(row)))
    }

    /// Replace the course, or create it under the given ID when it does not exist.
    pub async fn upsert(
        &self,
        author_id: Uuid,
        course_id: Uuid,
        req: CourseForUpdateDto,
    ) -> Result<Option<Upserted>> {
        if !self.db.author_exists(author_id).await? {
            return Ok(None);
        }

        let update = UpdateCourse {
            title: req.title.clone(),
            description: req.description.clone(),
        };
        if self
            .db
            .update_course(author_id, course_id, update)
            .await?
            .is_some()
        {
            return Ok(Some(Upserted::Updated));
        }

        let input = CreateCourseRow {
            id: Some(course_id),
            title: req.title,
            description: req.description,
        };
        let row = self.db.create_course(author_id, input).await?;
        tracing::info!(author_id = %author_id, course_id = %row.id, "Course created by upsert");

        Ok(Some(Upserted::Created(Self::row_to_course(row))))
    }

    pub async fn delete(&self, author_id: Uuid, course_id: Uuid) -> Result<bool> {
        self.db.delete_course(author_id, course_id).await
    }

    fn row_to_course(row: CourseRow) -> CourseDto {
        CourseDto {
            id: row.id,
            title: row.title,
            description: row.description,
            author_id: row.author_id,
        }
    }
}
