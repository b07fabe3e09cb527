//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates filtering and merge semantics from data access.
//! - Reuses entity definitions in the `models` crate.
//! - Provides clear error types consumed by the HTTP layer.

pub mod errors;
pub mod todo_service;
#[cfg(test)]
pub mod test_support;
