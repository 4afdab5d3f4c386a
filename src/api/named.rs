use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{FieldErrors, PayloadReader, UpdateMode};
use crate::database::models::NamedRecord;

pub const NAME_MAX_LENGTH: usize = 255;

/// Tag or ingredient on the wire; list and detail share this shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRepresentation {
    pub id: i64,
    pub name: String,
}

impl From<NamedRecord> for NamedRepresentation {
    fn from(record: NamedRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
        }
    }
}

/// Validate a tag/ingredient update. `None` means a partial update without a name.
pub fn parse_name(payload: &Value, mode: UpdateMode) -> Result<Option<String>, FieldErrors> {
    let mut reader = PayloadReader::new(payload)?;
    let name = reader.text("name", mode.requires_all(), false, NAME_MAX_LENGTH);
    reader.finish()?;
    Ok(name)
}
