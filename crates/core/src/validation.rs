// Request body validation
//
// Property rules run first; the cross-field title/description rule only runs
// once every property rule on the DTO has passed.

use crate::author::AuthorForCreationDto;
use crate::binding::ModelState;
use crate::course::{CourseForCreationDto, CourseForUpdateDto};

pub const MAX_COURSE_TITLE_CHARS: usize = 100;
pub const MAX_COURSE_DESCRIPTION_CHARS: usize = 1500;
pub const MAX_AUTHOR_NAME_CHARS: usize = 50;
pub const MAX_MAIN_CATEGORY_CHARS: usize = 50;

pub const TITLE_EQUALS_DESCRIPTION_MESSAGE: &str = "Title must be different from description";

/// Validation of a deserialized request body.
pub trait Validate {
    /// Errors keyed by camelCase property name; empty when valid.
    fn validate(&self) -> ModelState;
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn require(state: &mut ModelState, key: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        state.add_model_error(key, message);
    }
}

fn max_length(state: &mut ModelState, key: &str, value: &str, max: usize, message: &str) {
    if char_len(value) > max {
        state.add_model_error(key, message);
    }
}

fn validate_course_manipulation(
    dto_name: &str,
    title: &str,
    description: Option<&str>,
    description_required: bool,
) -> ModelState {
    let mut state = ModelState::new();

    require(&mut state, "title", title, "You should fill out a title.");
    max_length(
        &mut state,
        "title",
        title,
        MAX_COURSE_TITLE_CHARS,
        "The title shouldn't have more than 100 characters.",
    );

    if description_required {
        require(
            &mut state,
            "description",
            description.unwrap_or_default(),
            "You should fill out a description.",
        );
    }
    if let Some(description) = description {
        max_length(
            &mut state,
            "description",
            description,
            MAX_COURSE_DESCRIPTION_CHARS,
            "The description shouldn't have more than 1500 characters.",
        );
    }

    if state.is_valid() && description == Some(title) {
        state.add_model_error(dto_name, TITLE_EQUALS_DESCRIPTION_MESSAGE);
    }

    state
}

impl Validate for CourseForCreationDto {
    fn validate(&self) -> ModelState {
        validate_course_manipulation(
            "CourseForCreationDto",
            &self.title,
            self.description.as_deref(),
            false,
        )
    }
}

impl Validate for CourseForUpdateDto {
    fn validate(&self) -> ModelState {
        validate_course_manipulation(
            "CourseForUpdateDto",
            &self.title,
            self.description.as_deref(),
            true,
        )
    }
}

impl Validate for AuthorForCreationDto {
    fn validate(&self) -> ModelState {
        let mut state = ModelState::new();

        require(
            &mut state,
            "firstName",
            &self.first_name,
            "You should fill out a first name.",
        );
        max_length(
            &mut state,
            "firstName",
            &self.first_name,
            MAX_AUTHOR_NAME_CHARS,
            "The first name shouldn't have more than 50 characters.",
        );
        require(
            &mut state,
            "lastName",
            &self.last_name,
            "You should fill out a last name.",
        );
        max_length(
            &mut state,
            "lastName",
            &self.last_name,
            MAX_AUTHOR_NAME_CHARS,
            "The last name shouldn't have more than 50 characters.",
        );
        if self.date_of_birth.is_none() {
            state.add_model_error("dateOfBirth", "You should fill out a date of birth.");
        }
        require(
            &mut state,
            "mainCategory",
            &self.main_category,
            "You should fill out a main category.",
        );
        max_length(
            &mut state,
            "mainCategory",
            &self.main_category,
            MAX_MAIN_CATEGORY_CHARS,
            "The main category shouldn't have more than 50 characters.",
        );

        for (index, course) in self.courses.iter().enumerate() {
            state.merge_prefixed(&format!("courses[{index}]."), course.validate());
        }

        state
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> ModelState {
        let mut state = ModelState::new();
        for (index, item) in self.iter().enumerate() {
            state.merge_prefixed(&format!("[{index}]."), item.validate());
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn course(title: &str, description: Option<&str>) -> CourseForCreationDto {
        CourseForCreationDto {
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    fn author() -> AuthorForCreationDto {
        AuthorForCreationDto {
            first_name: "Jaimy".to_string(),
            last_name: "Johnson".to_string(),
            date_of_birth: Some(Utc::now()),
            main_category: "Navigation".to_string(),
            courses: vec![],
        }
    }

    #[test]
    fn test_valid_course() {
        assert!(course("Navigation 101", Some("Stars and such")).validate().is_valid());
        assert!(course("Navigation 101", None).validate().is_valid());
    }

    #[test]
    fn test_missing_title() {
        let state = course("  ", None).validate();
        assert_eq!(
            state.errors("title").unwrap(),
            &["You should fill out a title.".to_string()]
        );
    }

    #[test]
    fn test_title_length_limit() {
        assert!(course(&"x".repeat(MAX_COURSE_TITLE_CHARS), None)
            .validate()
            .is_valid());
        assert!(course(&"x".repeat(MAX_COURSE_TITLE_CHARS + 1), None)
            .validate()
            .contains_key("title"));
    }

    #[test]
    fn test_description_length_limit() {
        let long = "d".repeat(MAX_COURSE_DESCRIPTION_CHARS + 1);
        assert!(course("Title", Some(&long))
            .validate()
            .contains_key("description"));
    }

    #[test]
    fn test_title_must_differ_from_description() {
        let state = course("Same", Some("Same")).validate();
        assert_eq!(
            state.errors("CourseForCreationDto").unwrap(),
            &[TITLE_EQUALS_DESCRIPTION_MESSAGE.to_string()]
        );
    }

    #[test]
    fn test_cross_field_rule_waits_for_property_rules() {
        let long = "x".repeat(MAX_COURSE_TITLE_CHARS + 1);
        let state = course(&long, Some(&long)).validate();
        assert!(state.contains_key("title"));
        assert!(!state.contains_key("CourseForCreationDto"));
    }

    #[test]
    fn test_update_requires_description() {
        let update = CourseForUpdateDto {
            title: "Title".to_string(),
            description: None,
        };
        assert!(update.validate().contains_key("description"));
    }

    #[test]
    fn test_author_required_fields() {
        let state = AuthorForCreationDto::default().validate();
        assert!(state.contains_key("firstName"));
        assert!(state.contains_key("lastName"));
        assert!(state.contains_key("dateOfBirth"));
        assert!(state.contains_key("mainCategory"));
    }

    #[test]
    fn test_author_nested_course_errors_are_prefixed() {
        let mut dto = author();
        dto.courses = vec![course("Fine", None), course("", None)];

        let state = dto.validate();
        assert_eq!(state.keys().collect::<Vec<_>>(), vec!["courses[1].title"]);
    }

    #[test]
    fn test_collection_errors_are_indexed() {
        let authors = vec![author(), AuthorForCreationDto::default()];
        let state = authors.validate();
        assert!(state.contains_key("[1].firstName"));
        assert!(!state.keys().any(|k| k.starts_with("[0]")));
    }
}
