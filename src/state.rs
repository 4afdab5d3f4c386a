use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::models::NamedKind;
use crate::database::RecipeStore;
use crate::services::{NamedService, RecipeService};

/// Shared handler state: configuration, store handle and the collections built on it
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn RecipeStore>,
    pub recipes: RecipeService,
    tags: NamedService,
    ingredients: NamedService,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn RecipeStore>) -> Self {
        Self {
            config: Arc::new(config),
            recipes: RecipeService::new(store.clone()),
            tags: NamedService::new(NamedKind::Tag, store.clone()),
            ingredients: NamedService::new(NamedKind::Ingredient, store.clone()),
            store,
        }
    }

    pub fn named(&self, kind: NamedKind) -> &NamedService {
        match kind {
            NamedKind::Tag => &self.tags,
            NamedKind::Ingredient => &self.ingredients,
        }
    }
}
