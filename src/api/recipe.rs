use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{FieldErrors, PayloadReader, UpdateMode};
use crate::database::models::{NewRecipe, Recipe, RecipeChanges};

pub const TITLE_MAX_LENGTH: usize = 255;
pub const LINK_MAX_LENGTH: usize = 255;
pub const PRICE_MAX_DIGITS: u32 = 5;
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Recipe as it appears in list responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: String,
}

/// Recipe as it appears in single-record responses: the summary plus `description`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    pub description: String,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link.clone(),
        }
    }
}

impl From<Recipe> for RecipeDetail {
    fn from(recipe: Recipe) -> Self {
        Self {
            summary: RecipeSummary::from(&recipe),
            description: recipe.description,
        }
    }
}

struct RecipeFields {
    title: Option<String>,
    time_minutes: Option<i32>,
    price: Option<Decimal>,
    link: Option<String>,
    description: Option<String>,
}

fn read_fields(payload: &Value, require_all: bool) -> Result<RecipeFields, FieldErrors> {
    let mut reader = PayloadReader::new(payload)?;

    let fields = RecipeFields {
        title: reader.text("title", require_all, false, TITLE_MAX_LENGTH),
        time_minutes: reader.non_negative_integer("time_minutes", require_all),
        price: reader.non_negative_decimal("price", require_all, PRICE_MAX_DIGITS, PRICE_DECIMAL_PLACES),
        link: reader.text("link", false, true, LINK_MAX_LENGTH),
        description: reader.text("description", false, true, usize::MAX),
    };

    reader.finish()?;
    Ok(fields)
}

/// Validate a create payload. Owner and id fields in the payload are ignored.
pub fn parse_new_recipe(payload: &Value) -> Result<NewRecipe, FieldErrors> {
    let fields = read_fields(payload, true)?;

    match (fields.title, fields.time_minutes, fields.price) {
        (Some(title), Some(time_minutes), Some(price)) => Ok(NewRecipe {
            title,
            time_minutes,
            price,
            link: fields.link.unwrap_or_default(),
            description: fields.description.unwrap_or_default(),
        }),
        // read_fields reports every missing required field
        _ => Err(FieldErrors::new()),
    }
}

/// Validate an update payload. Optional fields left out keep their stored value.
pub fn parse_recipe_changes(payload: &Value, mode: UpdateMode) -> Result<RecipeChanges, FieldErrors> {
    let fields = read_fields(payload, mode.requires_all())?;

    Ok(RecipeChanges {
        title: fields.title,
        time_minutes: fields.time_minutes,
        price: fields.price,
        link: fields.link,
        description: fields.description,
    })
}
