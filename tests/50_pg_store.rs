// Runs against the database named by DATABASE_URL; every test returns early
// when it is unset. Each test works with freshly inserted users, so runs can
// share one database.

use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool};
use tokio::sync::OnceCell;
use uuid::Uuid;

use recipe_api::config::AppConfig;
use recipe_api::database::models::{NamedKind, NewRecipe, RecipeChanges};
use recipe_api::database::{DatabaseManager, PgStore, RecipeStore};

static SCHEMA: OnceCell<()> = OnceCell::const_new();

async fn connect() -> Result<Option<(PgStore, PgPool)>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL store test");
        return Ok(None);
    };

    let mut config = AppConfig::development().database;
    config.url = Some(url);
    config.max_connections = 2;
    let pool = DatabaseManager::connect(&config).await?;

    SCHEMA
        .get_or_try_init(|| async {
            pool.execute(include_str!("../sql/schema.sql")).await?;
            Ok::<(), sqlx::Error>(())
        })
        .await?;

    Ok(Some((PgStore::new(pool.clone()), pool)))
}

async fn insert_user(pool: &PgPool) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, email, name) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(format!("{}@example.com", id.simple()))
        .bind("Store Test")
        .execute(pool)
        .await?;
    Ok(id)
}

async fn insert_named(pool: &PgPool, kind: NamedKind, owner: Uuid, name: &str) -> Result<i64> {
    let sql = format!("INSERT INTO {} (user_id, name) VALUES ($1, $2) RETURNING id", kind.table_name());
    let id: i64 = sqlx::query_scalar(&sql).bind(owner).bind(name).fetch_one(pool).await?;
    Ok(id)
}

fn new_recipe(title: &str) -> NewRecipe {
    NewRecipe {
        title: title.to_string(),
        time_minutes: 22,
        price: Decimal::new(525, 2),
        link: "http://example.com/recipe.pdf".to_string(),
        description: String::new(),
    }
}

#[tokio::test]
async fn ping_and_find_user() -> Result<()> {
    let Some((store, pool)) = connect().await? else {
        return Ok(());
    };
    store.ping().await?;

    let id = insert_user(&pool).await?;
    let user = store.find_user(id).await?.expect("user row");
    assert!(user.is_active);
    assert!(store.find_user(Uuid::new_v4()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn recipes_are_scoped_to_owner_newest_first() -> Result<()> {
    let Some((store, pool)) = connect().await? else {
        return Ok(());
    };
    let alice = insert_user(&pool).await?;
    let bob = insert_user(&pool).await?;

    let first = store.insert_recipe(alice, new_recipe("first")).await?;
    store.insert_recipe(bob, new_recipe("bob's")).await?;
    let second = store.insert_recipe(alice, new_recipe("second")).await?;
    assert_eq!(first.user_id, alice);
    assert_eq!(first.price.to_string(), "5.25");

    let ids: Vec<i64> = store.list_recipes(alice).await?.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    Ok(())
}

#[tokio::test]
async fn foreign_recipe_is_invisible_and_untouched() -> Result<()> {
    let Some((store, pool)) = connect().await? else {
        return Ok(());
    };
    let alice = insert_user(&pool).await?;
    let bob = insert_user(&pool).await?;
    let recipe = store.insert_recipe(alice, new_recipe("mine")).await?;

    assert!(store.get_recipe(bob, recipe.id).await?.is_none());
    let changes = RecipeChanges {
        title: Some("stolen".to_string()),
        ..Default::default()
    };
    assert!(store.update_recipe(bob, recipe.id, changes).await?.is_none());
    assert!(!store.delete_recipe(bob, recipe.id).await?);

    assert_eq!(store.get_recipe(alice, recipe.id).await?, Some(recipe));
    Ok(())
}

#[tokio::test]
async fn partial_update_keeps_absent_columns() -> Result<()> {
    let Some((store, pool)) = connect().await? else {
        return Ok(());
    };
    let alice = insert_user(&pool).await?;
    let recipe = store.insert_recipe(alice, new_recipe("before")).await?;

    let changes = RecipeChanges {
        title: Some("after".to_string()),
        price: Some(Decimal::new(250, 2)),
        ..Default::default()
    };
    let updated = store.update_recipe(alice, recipe.id, changes).await?.expect("owned recipe");

    assert_eq!(updated.title, "after");
    assert_eq!(updated.price, Decimal::new(250, 2));
    assert_eq!(updated.link, recipe.link);
    assert_eq!(updated.time_minutes, recipe.time_minutes);
    assert_eq!(updated.user_id, alice);
    Ok(())
}

#[tokio::test]
async fn delete_twice_reports_missing() -> Result<()> {
    let Some((store, pool)) = connect().await? else {
        return Ok(());
    };
    let alice = insert_user(&pool).await?;
    let recipe = store.insert_recipe(alice, new_recipe("gone")).await?;

    assert!(store.delete_recipe(alice, recipe.id).await?);
    assert!(!store.delete_recipe(alice, recipe.id).await?);
    Ok(())
}

#[tokio::test]
async fn named_records_sort_by_name_then_id_descending() -> Result<()> {
    let Some((store, pool)) = connect().await? else {
        return Ok(());
    };
    let alice = insert_user(&pool).await?;
    let bob = insert_user(&pool).await?;

    let dinner_a = insert_named(&pool, NamedKind::Tag, alice, "Dinner").await?;
    let apple = insert_named(&pool, NamedKind::Tag, alice, "Apple").await?;
    let dinner_b = insert_named(&pool, NamedKind::Tag, alice, "Dinner").await?;
    insert_named(&pool, NamedKind::Tag, bob, "Zesty").await?;
    insert_named(&pool, NamedKind::Ingredient, alice, "Salt").await?;

    let ids: Vec<i64> = store
        .list_named(NamedKind::Tag, alice)
        .await?
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![dinner_b, dinner_a, apple]);
    Ok(())
}

#[tokio::test]
async fn named_writes_are_scoped_to_owner() -> Result<()> {
    let Some((store, pool)) = connect().await? else {
        return Ok(());
    };
    let alice = insert_user(&pool).await?;
    let bob = insert_user(&pool).await?;
    let id = insert_named(&pool, NamedKind::Ingredient, alice, "Salt").await?;

    assert!(store.get_named(NamedKind::Ingredient, bob, id).await?.is_none());
    assert!(store
        .rename_named(NamedKind::Ingredient, bob, id, "Sugar".to_string())
        .await?
        .is_none());
    assert!(!store.delete_named(NamedKind::Ingredient, bob, id).await?);
    // Same id is not reachable through the other kind
    assert!(store.get_named(NamedKind::Tag, alice, id).await?.is_none());

    let renamed = store
        .rename_named(NamedKind::Ingredient, alice, id, "Sea salt".to_string())
        .await?
        .expect("owned ingredient");
    assert_eq!(renamed.name, "Sea salt");

    assert!(store.delete_named(NamedKind::Ingredient, alice, id).await?);
    assert!(!store.delete_named(NamedKind::Ingredient, alice, id).await?);
    Ok(())
}
