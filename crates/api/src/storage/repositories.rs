// Repository layer for database operations
// Decision: IDs are UUID v7 generated here, not by Postgres defaults

use anyhow::Result;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::models::*;

/// Migrations embedded at compile time from `crates/api/migrations`.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Apply pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    // ============================================
    // Authors
    // ============================================

    pub async fn create_author(&self, input: CreateAuthorRow) -> Result<AuthorRow> {
        let mut tx = self.pool.begin().await?;
        let row = insert_author(&mut tx, &input).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Create every author in one transaction; nothing is stored if any insert fails.
    pub async fn create_authors(&self, inputs: Vec<CreateAuthorRow>) -> Result<Vec<AuthorRow>> {
        let mut tx = self.pool.begin().await?;
        let mut rows = Vec::with_capacity(inputs.len());
        for input in &inputs {
            rows.push(insert_author(&mut tx, input).await?);
        }
        tx.commit().await?;
        Ok(rows)
    }

    pub async fn get_author(&self, id: Uuid) -> Result<Option<AuthorRow>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, first_name, last_name, date_of_birth, main_category
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn author_exists(&self, id: Uuid) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM authors WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    pub async fn list_authors(&self, filter: &AuthorFilter) -> Result<Vec<AuthorRow>> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, first_name, last_name, date_of_birth, main_category
            FROM authors
            WHERE ($1::text IS NULL OR LOWER(main_category) = LOWER($1))
              AND ($2::text IS NULL
                   OR POSITION(LOWER($2) IN LOWER(main_category)) > 0
                   OR POSITION(LOWER($2) IN LOWER(first_name)) > 0
                   OR POSITION(LOWER($2) IN LOWER(last_name)) > 0)
              AND (CARDINALITY($3::uuid[]) = 0 OR id = ANY($3))
            ORDER BY first_name, last_name
            "#,
        )
        .bind(&filter.main_category)
        .bind(&filter.search_query)
        .bind(&filter.ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_authors_by_ids(&self, ids: &[Uuid]) -> Result<Vec<AuthorRow>> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, first_name, last_name, date_of_birth, main_category
            FROM authors
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Courses are removed by the `ON DELETE CASCADE` foreign key.
    pub async fn delete_author(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Courses
    // ============================================

    pub async fn create_course(&self, author_id: Uuid, input: CreateCourseRow) -> Result<CourseRow> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            INSERT INTO courses (id, author_id, title, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, title, description
            "#,
        )
        .bind(input.id.unwrap_or_else(Uuid::now_v7))
        .bind(author_id)
        .bind(&input.title)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_course(&self, author_id: Uuid, course_id: Uuid) -> Result<Option<CourseRow>> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, author_id, title, description
            FROM courses
            WHERE author_id = $1 AND id = $2
            "#,
        )
        .bind(author_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_courses(&self, author_id: Uuid) -> Result<Vec<CourseRow>> {
        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, author_id, title, description
            FROM courses
            WHERE author_id = $1
            ORDER BY title
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
        input: UpdateCourse,
    ) -> Result<Option<CourseRow>> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            UPDATE courses
            SET title = $3, description = $4
            WHERE author_id = $1 AND id = $2
            RETURNING id, author_id, title, description
            "#,
        )
        .bind(author_id)
        .bind(course_id)
        .bind(&input.title)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_course(&self, author_id: Uuid, course_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE author_id = $1 AND id = $2")
            .bind(author_id)
            .bind(course_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Insert an author and its courses on an open transaction.
async fn insert_author(conn: &mut PgConnection, input: &CreateAuthorRow) -> Result<AuthorRow> {
    let row = sqlx::query_as::<_, AuthorRow>(
        r#"
        INSERT INTO authors (id, first_name, last_name, date_of_birth, main_category)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, first_name, last_name, date_of_birth, main_category
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(input.date_of_birth)
    .bind(&input.main_category)
    .fetch_one(&mut *conn)
    .await?;

    for course in &input.courses {
        sqlx::query(
            r#"
            INSERT INTO courses (id, author_id, title, description)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(course.id.unwrap_or_else(Uuid::now_v7))
        .bind(row.id)
        .bind(&course.title)
        .bind(&course.description)
        .execute(&mut *conn)
        .await?;
    }

    Ok(row)
}
