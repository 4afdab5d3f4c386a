use clap::{Args, Subcommand};
use serde_json::{Map, Value};

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_record, output_records, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum RecipeCommands {
    #[command(about = "List your recipes, newest first")]
    List,

    #[command(about = "Show one recipe with its description")]
    Show {
        #[arg(help = "Recipe ID")]
        id: i64,
    },

    #[command(about = "Create a recipe")]
    Create {
        #[command(flatten)]
        fields: RecipeFields,
    },

    #[command(about = "Update a recipe (only the given fields unless --replace)")]
    Update {
        #[arg(help = "Recipe ID")]
        id: i64,
        #[arg(long, help = "Send a full update (PUT) instead of a partial one")]
        replace: bool,
        #[command(flatten)]
        fields: RecipeFields,
    },

    #[command(about = "Delete a recipe")]
    Delete {
        #[arg(help = "Recipe ID")]
        id: i64,
    },
}

#[derive(Args, Debug, Default)]
pub struct RecipeFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub time_minutes: Option<i64>,
    #[arg(long, help = "Decimal price, e.g. 5.25")]
    pub price: Option<String>,
    #[arg(long)]
    pub link: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl RecipeFields {
    /// Request body with only the given fields; the server does the validation.
    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        if let Some(title) = &self.title {
            payload.insert("title".to_string(), Value::from(title.as_str()));
        }
        if let Some(time_minutes) = self.time_minutes {
            payload.insert("time_minutes".to_string(), Value::from(time_minutes));
        }
        if let Some(price) = &self.price {
            payload.insert("price".to_string(), Value::from(price.as_str()));
        }
        if let Some(link) = &self.link {
            payload.insert("link".to_string(), Value::from(link.as_str()));
        }
        if let Some(description) = &self.description {
            payload.insert("description".to_string(), Value::from(description.as_str()));
        }
        Value::Object(payload)
    }
}

pub async fn handle(cmd: RecipeCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        RecipeCommands::List => {
            let recipes = client.get("/recipes").await?;
            output_records(output_format, "recipes", &recipes, describe)
        }
        RecipeCommands::Show { id } => {
            let recipe = client.get(&format!("/recipes/{id}")).await?;
            output_record(output_format, &recipe, describe_detail)
        }
        RecipeCommands::Create { fields } => {
            let recipe = client.post("/recipes", fields.to_payload()).await?;
            output_record(output_format, &recipe, describe_detail)
        }
        RecipeCommands::Update { id, replace, fields } => {
            let path = format!("/recipes/{id}");
            let recipe = if replace {
                client.put(&path, fields.to_payload()).await?
            } else {
                client.patch(&path, fields.to_payload()).await?
            };
            output_record(output_format, &recipe, describe_detail)
        }
        RecipeCommands::Delete { id } => {
            client.delete(&format!("/recipes/{id}")).await?;
            output_success(output_format, &format!("Deleted recipe {id}"), None)
        }
    }
}

fn describe(recipe: &Value) -> String {
    format!(
        "#{:<5} {}  ({} min, {})",
        recipe["id"].as_i64().unwrap_or_default(),
        recipe["title"].as_str().unwrap_or_default(),
        recipe["time_minutes"],
        recipe["price"].as_str().unwrap_or_default()
    )
}

fn describe_detail(recipe: &Value) -> String {
    let mut text = describe(recipe);
    if let Some(link) = recipe["link"].as_str().filter(|l| !l.is_empty()) {
        text.push_str(&format!("\nLink: {link}"));
    }
    if let Some(description) = recipe["description"].as_str().filter(|d| !d.is_empty()) {
        text.push_str(&format!("\n\n{description}"));
    }
    text
}
