// HTTP API routes
//
// This module contains all HTTP route handlers for the public API.
// Each resource submodule handles a specific resource type with its own AppState.

pub mod author_collections;
pub mod authors;
pub mod common;
pub mod courses;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod representation;

// Re-export common types
pub use error::{ApiError, UNEXPECTED_FAULT_MESSAGE};
pub use extract::{ModelQuery, ProblemContext, ResourcePath, ValidatedJson};
pub use representation::Representation;
