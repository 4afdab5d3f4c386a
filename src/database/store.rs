use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::{NamedKind, NamedRecord, NewRecipe, Recipe, RecipeChanges, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistent record store. Every record lookup takes the owner, so a record
/// belonging to someone else is reported exactly like a missing one.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Owner's recipes, newest id first.
    async fn list_recipes(&self, owner: Uuid) -> Result<Vec<Recipe>, StoreError>;
    async fn get_recipe(&self, owner: Uuid, id: i64) -> Result<Option<Recipe>, StoreError>;
    async fn insert_recipe(&self, owner: Uuid, recipe: NewRecipe) -> Result<Recipe, StoreError>;
    async fn update_recipe(
        &self,
        owner: Uuid,
        id: i64,
        changes: RecipeChanges,
    ) -> Result<Option<Recipe>, StoreError>;
    /// Returns false when nothing owned by `owner` had that id.
    async fn delete_recipe(&self, owner: Uuid, id: i64) -> Result<bool, StoreError>;

    /// Owner's tags or ingredients, by descending name then descending id.
    async fn list_named(&self, kind: NamedKind, owner: Uuid) -> Result<Vec<NamedRecord>, StoreError>;
    async fn get_named(
        &self,
        kind: NamedKind,
        owner: Uuid,
        id: i64,
    ) -> Result<Option<NamedRecord>, StoreError>;
    async fn rename_named(
        &self,
        kind: NamedKind,
        owner: Uuid,
        id: i64,
        name: String,
    ) -> Result<Option<NamedRecord>, StoreError>;
    async fn delete_named(&self, kind: NamedKind, owner: Uuid, id: i64) -> Result<bool, StoreError>;
}
