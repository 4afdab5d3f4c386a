use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::CollectionError;
use crate::api::{parse_name, NamedRepresentation, UpdateMode};
use crate::auth::Caller;
use crate::database::models::NamedKind;
use crate::database::RecipeStore;

/// Tag and ingredient collections. There is no create: these records are
/// only listed, read, renamed and deleted through the API.
#[derive(Clone)]
pub struct NamedService {
    kind: NamedKind,
    store: Arc<dyn RecipeStore>,
}

impl NamedService {
    pub fn new(kind: NamedKind, store: Arc<dyn RecipeStore>) -> Self {
        Self { kind, store }
    }

    pub async fn list(&self, caller: &Caller) -> Result<Vec<NamedRepresentation>, CollectionError> {
        let records = self.store.list_named(self.kind, caller.user_id).await?;
        debug!("Listed {} {}s for {}", records.len(), self.kind.label(), caller);
        Ok(records.into_iter().map(NamedRepresentation::from).collect())
    }

    pub async fn retrieve(&self, caller: &Caller, id: i64) -> Result<NamedRepresentation, CollectionError> {
        self.store
            .get_named(self.kind, caller.user_id, id)
            .await?
            .map(NamedRepresentation::from)
            .ok_or(CollectionError::NotFound)
    }

    pub async fn partial_update(
        &self,
        caller: &Caller,
        id: i64,
        payload: &Value,
    ) -> Result<NamedRepresentation, CollectionError> {
        self.update(caller, id, payload, UpdateMode::Partial).await
    }

    pub async fn full_update(
        &self,
        caller: &Caller,
        id: i64,
        payload: &Value,
    ) -> Result<NamedRepresentation, CollectionError> {
        self.update(caller, id, payload, UpdateMode::Full).await
    }

    async fn update(
        &self,
        caller: &Caller,
        id: i64,
        payload: &Value,
        mode: UpdateMode,
    ) -> Result<NamedRepresentation, CollectionError> {
        let current = self
            .store
            .get_named(self.kind, caller.user_id, id)
            .await?
            .ok_or(CollectionError::NotFound)?;

        let Some(name) = parse_name(payload, mode)? else {
            // Nothing writable in the payload
            return Ok(current.into());
        };

        let record = self
            .store
            .rename_named(self.kind, caller.user_id, id, name)
            .await?
            .ok_or(CollectionError::NotFound)?;
        debug!("Renamed {} {} for {}", self.kind.label(), id, caller);
        Ok(record.into())
    }

    pub async fn delete(&self, caller: &Caller, id: i64) -> Result<(), CollectionError> {
        if !self.store.delete_named(self.kind, caller.user_id, id).await? {
            return Err(CollectionError::NotFound);
        }
        info!("Deleted {} {} for {}", self.kind.label(), id, caller);
        Ok(())
    }
}
