//! Ownership-scoped collections.
//!
//! Every operation takes the resolved caller and only ever touches records
//! that caller owns. A record owned by someone else is reported as
//! `CollectionError::NotFound`, the same as a missing one.

pub mod named_service;
pub mod recipe_service;

use thiserror::Error;

use crate::api::FieldErrors;
use crate::database::StoreError;

pub use named_service::NamedService;
pub use recipe_service::RecipeService;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Record not found")]
    NotFound,

    #[error("Invalid payload: {0:?}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<FieldErrors> for CollectionError {
    fn from(errors: FieldErrors) -> Self {
        CollectionError::Validation(errors)
    }
}
