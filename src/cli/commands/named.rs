use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_record, output_records, output_success};
use crate::cli::OutputFormat;

/// Which named collection a `tag`/`ingredient` command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Tags,
    Ingredients,
}

impl Collection {
    pub fn path(self) -> &'static str {
        match self {
            Collection::Tags => "/tags",
            Collection::Ingredients => "/ingredients",
        }
    }

    fn singular(self) -> &'static str {
        match self {
            Collection::Tags => "tag",
            Collection::Ingredients => "ingredient",
        }
    }
}

#[derive(Subcommand)]
pub enum NamedCommands {
    #[command(about = "List your records by descending name")]
    List,

    #[command(about = "Show one record")]
    Show {
        #[arg(help = "Record ID")]
        id: i64,
    },

    #[command(about = "Rename a record")]
    Rename {
        #[arg(help = "Record ID")]
        id: i64,
        #[arg(help = "New name")]
        name: String,
    },

    #[command(about = "Delete a record")]
    Delete {
        #[arg(help = "Record ID")]
        id: i64,
    },
}

pub async fn handle(
    collection: Collection,
    cmd: NamedCommands,
    client: &ApiClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let base = collection.path();

    match cmd {
        NamedCommands::List => {
            let records = client.get(base).await?;
            output_records(output_format, &base[1..], &records, describe)
        }
        NamedCommands::Show { id } => {
            let record = client.get(&format!("{base}/{id}")).await?;
            output_record(output_format, &record, describe)
        }
        NamedCommands::Rename { id, name } => {
            let record = client.patch(&format!("{base}/{id}"), json!({ "name": name })).await?;
            output_record(output_format, &record, describe)
        }
        NamedCommands::Delete { id } => {
            client.delete(&format!("{base}/{id}")).await?;
            output_success(
                output_format,
                &format!("Deleted {} {}", collection.singular(), id),
                None,
            )
        }
    }
}

fn describe(record: &Value) -> String {
    format!(
        "#{:<5} {}",
        record["id"].as_i64().unwrap_or_default(),
        record["name"].as_str().unwrap_or_default()
    )
}
