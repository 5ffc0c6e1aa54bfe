// Services layer for business logic
// Services map storage rows to DTOs, calling storage directly

pub mod author;
pub mod course;

pub use author::AuthorService;
pub use course::{CourseService, Upserted};
