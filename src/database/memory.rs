use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{NamedKind, NamedRecord, NewRecipe, Recipe, RecipeChanges, User};
use super::store::{RecipeStore, StoreError};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    recipes: BTreeMap<i64, Recipe>,
    named: HashMap<NamedKind, BTreeMap<i64, NamedRecord>>,
    next_id: HashMap<&'static str, i64>,
}

impl Tables {
    fn allocate_id(&mut self, table: &'static str) -> i64 {
        let next = self.next_id.entry(table).or_insert(0);
        *next += 1;
        *next
    }
}

/// In-process `RecipeStore` used by tests and local experiments.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision a user account.
    pub async fn insert_user(&self, user: User) -> User {
        let mut tables = self.tables.write().await;
        tables.users.insert(user.id, user.clone());
        user
    }

    pub async fn set_user_active(&self, id: Uuid, is_active: bool) -> bool {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&id) {
            Some(user) => {
                user.is_active = is_active;
                true
            }
            None => false,
        }
    }

    /// Seed a tag or ingredient; the HTTP surface has no create for these.
    pub async fn insert_named(&self, kind: NamedKind, owner: Uuid, name: impl Into<String>) -> NamedRecord {
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id(kind.table_name());
        let record = NamedRecord {
            id,
            user_id: owner,
            name: name.into(),
        };
        tables.named.entry(kind).or_default().insert(id, record.clone());
        record
    }

    /// Unscoped lookup for assertions about records owned by someone else.
    pub async fn recipe_by_id(&self, id: i64) -> Option<Recipe> {
        self.tables.read().await.recipes.get(&id).cloned()
    }

    pub async fn named_by_id(&self, kind: NamedKind, id: i64) -> Option<NamedRecord> {
        self.tables
            .read()
            .await
            .named
            .get(&kind)
            .and_then(|records| records.get(&id))
            .cloned()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn list_recipes(&self, owner: Uuid) -> Result<Vec<Recipe>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .recipes
            .values()
            .rev()
            .filter(|r| r.user_id == owner)
            .cloned()
            .collect())
    }

    async fn get_recipe(&self, owner: Uuid, id: i64) -> Result<Option<Recipe>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.recipes.get(&id).filter(|r| r.user_id == owner).cloned())
    }

    async fn insert_recipe(&self, owner: Uuid, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id("recipes");
        let created = Recipe {
            id,
            user_id: owner,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
            description: recipe.description,
        };
        tables.recipes.insert(id, created.clone());
        Ok(created)
    }

    async fn update_recipe(
        &self,
        owner: Uuid,
        id: i64,
        changes: RecipeChanges,
    ) -> Result<Option<Recipe>, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.recipes.get_mut(&id).filter(|r| r.user_id == owner) {
            Some(recipe) => {
                changes.apply_to(recipe);
                Ok(Some(recipe.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_recipe(&self, owner: Uuid, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let owned = tables.recipes.get(&id).is_some_and(|r| r.user_id == owner);
        if owned {
            tables.recipes.remove(&id);
        }
        Ok(owned)
    }

    async fn list_named(&self, kind: NamedKind, owner: Uuid) -> Result<Vec<NamedRecord>, StoreError> {
        let tables = self.tables.read().await;
        let mut records: Vec<NamedRecord> = tables
            .named
            .get(&kind)
            .map(|records| records.values().filter(|r| r.user_id == owner).cloned().collect())
            .unwrap_or_default();
        records.sort_by(|a, b| b.name.cmp(&a.name).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn get_named(
        &self,
        kind: NamedKind,
        owner: Uuid,
        id: i64,
    ) -> Result<Option<NamedRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .named
            .get(&kind)
            .and_then(|records| records.get(&id))
            .filter(|r| r.user_id == owner)
            .cloned())
    }

    async fn rename_named(
        &self,
        kind: NamedKind,
        owner: Uuid,
        id: i64,
        name: String,
    ) -> Result<Option<NamedRecord>, StoreError> {
        let mut tables = self.tables.write().await;
        let record = tables
            .named
            .get_mut(&kind)
            .and_then(|records| records.get_mut(&id))
            .filter(|r| r.user_id == owner);

        Ok(record.map(|r| {
            r.name = name;
            r.clone()
        }))
    }

    async fn delete_named(&self, kind: NamedKind, owner: Uuid, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(records) = tables.named.get_mut(&kind) else {
            return Ok(false);
        };
        let owned = records.get(&id).is_some_and(|r| r.user_id == owner);
        if owned {
            records.remove(&id);
        }
        Ok(owned)
    }
}
