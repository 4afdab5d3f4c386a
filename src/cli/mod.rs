pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::ApiClient;

#[derive(Parser)]
#[command(name = "recipes")]
#[command(about = "Recipes CLI - Command-line client for the Recipe API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "RECIPE_API_URL",
        default_value = "http://localhost:3000",
        help = "API base URL"
    )]
    pub server: String,

    #[arg(long, global = true, env = "RECIPE_API_TOKEN", hide_env_values = true, help = "Bearer token")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Check server health status from API /health endpoint")]
    Health,

    #[command(about = "Recipe operations")]
    Recipe {
        #[command(subcommand)]
        cmd: commands::recipe::RecipeCommands,
    },

    #[command(about = "Tag operations")]
    Tag {
        #[command(subcommand)]
        cmd: commands::named::NamedCommands,
    },

    #[command(about = "Ingredient operations")]
    Ingredient {
        #[command(subcommand)]
        cmd: commands::named::NamedCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(cli.server, cli.token)?;

    match cli.command {
        Commands::Health => commands::health::handle(&client, output_format).await,
        Commands::Recipe { cmd } => commands::recipe::handle(cmd, &client, output_format).await,
        Commands::Tag { cmd } => {
            commands::named::handle(commands::named::Collection::Tags, cmd, &client, output_format).await
        }
        Commands::Ingredient { cmd } => {
            commands::named::handle(commands::named::Collection::Ingredients, cmd, &client, output_format)
                .await
        }
    }
}
