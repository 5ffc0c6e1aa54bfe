// Course Library core
//
// HTTP- and storage-agnostic building blocks for the Course Library API:
// - binding: comma-delimited query collections, value providers, model state
// - problem: the problem-details envelope for validation failures
// - validation: request body rules
// - author / course: DTOs returned and accepted by the API
// - resource_parameters: query models bound by the list endpoints

pub mod author;
pub mod binding;
pub mod course;
pub mod problem;
pub mod resource_parameters;
pub mod validation;

pub use author::{current_age, full_name, AuthorDto, AuthorForCreationDto};
pub use binding::{
    bind_query, parse_delimited, ArrayModelBinder, BindQueryModel, BindingContext,
    ConversionError, ModelBinder, ModelBindingResult, ModelMetadata, ModelState,
    QueryValueProvider, SimpleTypeModelBinder, ValueProvider,
};
pub use course::{CourseDto, CourseForCreationDto, CourseForUpdateDto};
pub use problem::ValidationProblemDetails;
pub use resource_parameters::{AuthorCollectionParameters, AuthorsResourceParameters};
pub use validation::Validate;
