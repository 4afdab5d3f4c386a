pub mod named;
pub mod recipe;
pub mod user;

pub use named::{NamedKind, NamedRecord};
pub use recipe::{NewRecipe, Recipe, RecipeChanges};
pub use user::User;
