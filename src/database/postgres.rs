use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{NamedKind, NamedRecord, NewRecipe, Recipe, RecipeChanges, User};
use super::store::{RecipeStore, StoreError};

const RECIPE_COLUMNS: &str = "id, user_id, title, time_minutes, price, link, description";

/// `RecipeStore` backed by the tables in `sql/schema.sql`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, is_active, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_recipes(&self, owner: Uuid) -> Result<Vec<Recipe>, StoreError> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE user_id = $1 ORDER BY id DESC");
        let recipes = sqlx::query_as::<_, Recipe>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        Ok(recipes)
    }

    async fn get_recipe(&self, owner: Uuid, id: i64) -> Result<Option<Recipe>, StoreError> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1 AND user_id = $2");
        let recipe = sqlx::query_as::<_, Recipe>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;

        Ok(recipe)
    }

    async fn insert_recipe(&self, owner: Uuid, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let sql = format!(
            "INSERT INTO recipes (user_id, title, time_minutes, price, link, description) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {RECIPE_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Recipe>(&sql)
            .bind(owner)
            .bind(recipe.title)
            .bind(recipe.time_minutes)
            .bind(recipe.price)
            .bind(recipe.link)
            .bind(recipe.description)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn update_recipe(
        &self,
        owner: Uuid,
        id: i64,
        changes: RecipeChanges,
    ) -> Result<Option<Recipe>, StoreError> {
        // Single statement: absent fields fall back to the stored column.
        let sql = format!(
            "UPDATE recipes SET \
                title = COALESCE($3, title), \
                time_minutes = COALESCE($4, time_minutes), \
                price = COALESCE($5, price), \
                link = COALESCE($6, link), \
                description = COALESCE($7, description) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {RECIPE_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Recipe>(&sql)
            .bind(id)
            .bind(owner)
            .bind(changes.title)
            .bind(changes.time_minutes)
            .bind(changes.price)
            .bind(changes.link)
            .bind(changes.description)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn delete_recipe(&self, owner: Uuid, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_named(&self, kind: NamedKind, owner: Uuid) -> Result<Vec<NamedRecord>, StoreError> {
        let sql = format!(
            "SELECT id, user_id, name FROM {} WHERE user_id = $1 ORDER BY name DESC, id DESC",
            kind.table_name()
        );
        let records = sqlx::query_as::<_, NamedRecord>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn get_named(
        &self,
        kind: NamedKind,
        owner: Uuid,
        id: i64,
    ) -> Result<Option<NamedRecord>, StoreError> {
        let sql = format!(
            "SELECT id, user_id, name FROM {} WHERE id = $1 AND user_id = $2",
            kind.table_name()
        );
        let record = sqlx::query_as::<_, NamedRecord>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn rename_named(
        &self,
        kind: NamedKind,
        owner: Uuid,
        id: i64,
        name: String,
    ) -> Result<Option<NamedRecord>, StoreError> {
        let sql = format!(
            "UPDATE {} SET name = $3 WHERE id = $1 AND user_id = $2 RETURNING id, user_id, name",
            kind.table_name()
        );
        let record = sqlx::query_as::<_, NamedRecord>(&sql)
            .bind(id)
            .bind(owner)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn delete_named(&self, kind: NamedKind, owner: Uuid, id: i64) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", kind.table_name());
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
