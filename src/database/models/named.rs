use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Record kinds that carry nothing but an owner and a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedKind {
    Tag,
    Ingredient,
}

impl NamedKind {
    pub fn table_name(self) -> &'static str {
        match self {
            NamedKind::Tag => "tags",
            NamedKind::Ingredient => "ingredients",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NamedKind::Tag => "Tag",
            NamedKind::Ingredient => "Ingredient",
        }
    }
}

/// A tag or ingredient row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct NamedRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
}

impl fmt::Display for NamedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
