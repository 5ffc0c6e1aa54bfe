// Author domain types
//
// Response and creation DTOs for authors, plus age calculation for responses.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::course::CourseForCreationDto;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Author as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    /// First and last name joined by a space.
    #[cfg_attr(feature = "openapi", schema(example = "Berry Griffin Beard"))]
    pub name: String,
    /// Age in whole years.
    pub age: i32,
    #[cfg_attr(feature = "openapi", schema(example = "Ships"))]
    pub main_category: String,
}

/// Request body for creating an author, optionally with courses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreationDto {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default)]
    pub main_category: String,
    /// Courses created together with the author.
    #[serde(default)]
    pub courses: Vec<CourseForCreationDto>,
}

/// Display name used in author responses.
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
}

/// Whole years between `date_of_birth` and `today`.
///
/// A 29 February birthday counts as reached on 28 February in common years.
pub fn current_age(date_of_birth: DateTime<Utc>, today: NaiveDate) -> i32 {
    let born = date_of_birth.date_naive();
    let years = today.year() - born.year();

    // Birthday in today's year, found by shifting the birth date by `years`.
    let anniversary = years
        .unsigned_abs()
        .checked_mul(12)
        .map(Months::new)
        .and_then(|months| {
            if years >= 0 {
                born.checked_add_months(months)
            } else {
                born.checked_sub_months(months)
            }
        });

    match anniversary {
        Some(anniversary) if today < anniversary => years - 1,
        _ => years,
    }
}
