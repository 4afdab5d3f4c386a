//! Wire representations and payload validation.
//!
//! List responses use the lean summary shapes; single-record responses use
//! the detail shapes, which embed the summary and add the remaining fields.

pub mod fields;
pub mod named;
pub mod recipe;

pub use fields::{FieldErrors, UpdateMode};
pub use named::{parse_name, NamedRepresentation};
pub use recipe::{parse_new_recipe, parse_recipe_changes, RecipeDetail, RecipeSummary};
