use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::CollectionError;
use crate::api::{parse_new_recipe, parse_recipe_changes, RecipeDetail, RecipeSummary, UpdateMode};
use crate::auth::Caller;
use crate::database::RecipeStore;

#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Caller's recipes, newest first
    pub async fn list(&self, caller: &Caller) -> Result<Vec<RecipeSummary>, CollectionError> {
        let recipes = self.store.list_recipes(caller.user_id).await?;
        debug!("Listed {} recipes for {}", recipes.len(), caller);
        Ok(recipes.iter().map(RecipeSummary::from).collect())
    }

    pub async fn retrieve(&self, caller: &Caller, id: i64) -> Result<RecipeDetail, CollectionError> {
        self.store
            .get_recipe(caller.user_id, id)
            .await?
            .map(RecipeDetail::from)
            .ok_or(CollectionError::NotFound)
    }

    pub async fn create(&self, caller: &Caller, payload: &Value) -> Result<RecipeDetail, CollectionError> {
        let new_recipe = parse_new_recipe(payload)?;
        let recipe = self.store.insert_recipe(caller.user_id, new_recipe).await?;
        info!("Created recipe {} for {}", recipe.id, caller);
        Ok(recipe.into())
    }

    pub async fn partial_update(
        &self,
        caller: &Caller,
        id: i64,
        payload: &Value,
    ) -> Result<RecipeDetail, CollectionError> {
        self.update(caller, id, payload, UpdateMode::Partial).await
    }

    pub async fn full_update(
        &self,
        caller: &Caller,
        id: i64,
        payload: &Value,
    ) -> Result<RecipeDetail, CollectionError> {
        self.update(caller, id, payload, UpdateMode::Full).await
    }

    async fn update(
        &self,
        caller: &Caller,
        id: i64,
        payload: &Value,
        mode: UpdateMode,
    ) -> Result<RecipeDetail, CollectionError> {
        // Visibility first: a record the caller cannot see is missing, whatever the payload
        if self.store.get_recipe(caller.user_id, id).await?.is_none() {
            return Err(CollectionError::NotFound);
        }

        let changes = parse_recipe_changes(payload, mode)?;
        let recipe = self
            .store
            .update_recipe(caller.user_id, id, changes)
            .await?
            .ok_or(CollectionError::NotFound)?;
        debug!("Updated recipe {} ({:?}) for {}", id, mode, caller);
        Ok(recipe.into())
    }

    pub async fn delete(&self, caller: &Caller, id: i64) -> Result<(), CollectionError> {
        if !self.store.delete_recipe(caller.user_id, id).await? {
            return Err(CollectionError::NotFound);
        }
        info!("Deleted recipe {} for {}", id, caller);
        Ok(())
    }
}
