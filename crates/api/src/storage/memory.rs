// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// This implementation provides a PostgreSQL-compatible API backed by in-memory
// HashMaps, allowing the API to run without a database for development.

use anyhow::{anyhow, Result};
use chrono::{TimeZone, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    authors: RwLock<HashMap<Uuid, AuthorRow>>,
    courses: RwLock<HashMap<Uuid, CourseRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Database pre-populated with a few authors and their courses.
    pub fn with_sample_data() -> Self {
        let db = Self::new();
        {
            let mut authors = db.authors.write();
            let mut courses = db.courses.write();
            for (author, author_courses) in sample_data() {
                for course in author_courses {
                    courses.insert(course.id, course);
                }
                authors.insert(author.id, author);
            }
        }
        db
    }

    // ============================================
    // Authors
    // ============================================

    pub async fn create_author(&self, input: CreateAuthorRow) -> Result<AuthorRow> {
        let mut rows = self.create_authors(vec![input]).await?;
        rows.pop().ok_or_else(|| anyhow!("Author insert returned no row"))
    }

    /// Create every author under one write lock; nothing is stored if any course ID collides.
    pub async fn create_authors(&self, inputs: Vec<CreateAuthorRow>) -> Result<Vec<AuthorRow>> {
        let mut authors = self.authors.write();
        let mut courses = self.courses.write();

        let mut staged_authors = Vec::with_capacity(inputs.len());
        let mut staged_courses: HashMap<Uuid, CourseRow> = HashMap::new();
        for input in inputs {
            let id = Uuid::now_v7();
            for course in input.courses {
                let course_id = course.id.unwrap_or_else(Uuid::now_v7);
                if courses.contains_key(&course_id) || staged_courses.contains_key(&course_id) {
                    return Err(anyhow!("Course already exists: {}", course_id));
                }
                staged_courses.insert(
                    course_id,
                    CourseRow {
                        id: course_id,
                        author_id: id,
                        title: course.title,
                        description: course.description,
                    },
                );
            }
            staged_authors.push(AuthorRow {
                id,
                first_name: input.first_name,
                last_name: input.last_name,
                date_of_birth: input.date_of_birth,
                main_category: input.main_category,
            });
        }

        courses.extend(staged_courses);
        for row in &staged_authors {
            authors.insert(row.id, row.clone());
        }
        Ok(staged_authors)
    }

    pub async fn get_author(&self, id: Uuid) -> Result<Option<AuthorRow>> {
        Ok(self.authors.read().get(&id).cloned())
    }

    pub async fn author_exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.authors.read().contains_key(&id))
    }

    pub async fn list_authors(&self, filter: &AuthorFilter) -> Result<Vec<AuthorRow>> {
        let mut rows: Vec<_> = self
            .authors
            .read()
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.first_name
                .cmp(&b.first_name)
                .then_with(|| a.last_name.cmp(&b.last_name))
        });
        Ok(rows)
    }

    pub async fn get_authors_by_ids(&self, ids: &[Uuid]) -> Result<Vec<AuthorRow>> {
        let authors = self.authors.read();
        Ok(ids.iter().filter_map(|id| authors.get(id).cloned()).collect())
    }

    pub async fn delete_author(&self, id: Uuid) -> Result<bool> {
        let removed = self.authors.write().remove(&id).is_some();
        if removed {
            self.courses.write().retain(|_, c| c.author_id != id);
        }
        Ok(removed)
    }

    // ============================================
    // Courses
    // ============================================

    pub async fn create_course(&self, author_id: Uuid, input: CreateCourseRow) -> Result<CourseRow> {
        if !self.authors.read().contains_key(&author_id) {
            return Err(anyhow!("Author not found: {}", author_id));
        }

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let mut courses = self.courses.write();
        if courses.contains_key(&id) {
            return Err(anyhow!("Course already exists: {}", id));
        }

        let row = CourseRow {
            id,
            author_id,
            title: input.title,
            description: input.description,
        };
        courses.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_course(&self, author_id: Uuid, course_id: Uuid) -> Result<Option<CourseRow>> {
        Ok(self
            .courses
            .read()
            .get(&course_id)
            .filter(|c| c.author_id == author_id)
            .cloned())
    }

    pub async fn list_courses(&self, author_id: Uuid) -> Result<Vec<CourseRow>> {
        let mut rows: Vec<_> = self
            .courses
            .read()
            .values()
            .filter(|c| c.author_id == author_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(rows)
    }

    pub async fn update_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
        input: UpdateCourse,
    ) -> Result<Option<CourseRow>> {
        let mut courses = self.courses.write();
        match courses.get_mut(&course_id) {
            Some(course) if course.author_id == author_id => {
                course.title = input.title;
                course.description = input.description;
                Ok(Some(course.clone()))
            }
            _ => Ok(None),
        }
    }

    pub async fn delete_course(&self, author_id: Uuid, course_id: Uuid) -> Result<bool> {
        let mut courses = self.courses.write();
        match courses.get(&course_id) {
            Some(course) if course.author_id == author_id => {
                courses.remove(&course_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

fn sample_data() -> Vec<(AuthorRow, Vec<CourseRow>)> {
    let author = |id: u128, first: &str, last: &str, (y, m, d): (i32, u32, u32), category: &str| {
        AuthorRow {
            id: Uuid::from_u128(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: Utc
                .with_ymd_and_hms(y, m, d, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            main_category: category.to_string(),
        }
    };
    let course = |id: u128, author: &AuthorRow, title: &str, description: &str| CourseRow {
        id: Uuid::from_u128(id),
        author_id: author.id,
        title: title.to_string(),
        description: Some(description.to_string()),
    };

    let beard = author(0xd28888e9_2ba9_473a_a40f_e38cb54f9b35, "Berry", "Griffin Beard", (1650, 7, 23), "Ships");
    let rye = author(0xda2fd609_d754_4feb_8acd_c4f9ff13ba96, "Nancy", "Swashbuckler Rye", (1668, 5, 21), "Rum");
    let bones = author(0x2902b665_1190_4c70_9915_b9c2d7680450, "Eli", "Ivory Bones", (1701, 12, 16), "Singing");
    let flint = author(0x102b566b_ba1f_404c_b2df_e2cde39ade09, "Arnold", "Ned Flint", (1702, 3, 6), "Singing");

    let beard_courses = vec![
        course(
            0x5b1c2b4d_48c7_402a_80c3_cc796ad49c6b,
            &beard,
            "Commandeering a Ship Without Getting Caught",
            "Commandeering a ship in rough waters isn't easy. Commandeering it without getting caught is even harder.",
        ),
        course(
            0xd8663e5e_7494_4f81_8739_6e0de1bea7ee,
            &beard,
            "Overthrowing Mutiny",
            "In this course, the author provides tips to avoid, or, if needed, overthrow pirate mutiny.",
        ),
    ];
    let rye_courses = vec![course(
        0xd173e20d_159e_4127_9ce9_b0ac2564ad97,
        &rye,
        "Avoiding Brawls While Drinking as Much Rum as You Desire",
        "Every good pirate loves rum, but it also has a tendency to get you into trouble.",
    )];
    let bones_courses = vec![course(
        0x40ff5488_fdab_45b5_bc3a_14302d59869a,
        &bones,
        "Singalong Pirate Hits",
        "In this course you'll learn how to sing all-time favourite pirate songs without sounding like you actually know the words or how to hold a note.",
    )];

    vec![
        (beard, beard_courses),
        (rye, rye_courses),
        (bones, bones_courses),
        (flint, Vec::new()),
    ]
}
