//! Per-session key/value storage and sort-state persistence

use crate::core::sort::SortState;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

/// Session key holding the serialized [`SortState`]
pub const SORT_STATE_KEY: &str = "sort_state";

/// Session store collaborator
///
/// Values are scoped by session id. Concurrent writers to the same key are
/// not coordinated: the last write wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session: &Uuid, key: &str) -> Result<Option<Value>>;

    async fn set(&self, session: &Uuid, key: &str, value: Value) -> Result<()>;

    async fn delete(&self, session: &Uuid, key: &str) -> Result<()>;
}

/// Load the sort state of a session
///
/// Missing or unreadable data yields the empty state.
pub async fn load_sort_state(store: &dyn SessionStore, session: &Uuid) -> Result<SortState> {
    let Some(value) = store.get(session, SORT_STATE_KEY).await? else {
        return Ok(SortState::new());
    };

    match serde_json::from_value(value) {
        Ok(state) => Ok(state),
        Err(e) => {
            tracing::warn!(session = %session, error = %e, "discarding unreadable sort state");
            Ok(SortState::new())
        }
    }
}

/// Persist the sort state of a session; an empty state removes the key
pub async fn save_sort_state(
    store: &dyn SessionStore,
    session: &Uuid,
    state: &SortState,
) -> Result<()> {
    if state.is_empty() {
        store.delete(session, SORT_STATE_KEY).await
    } else {
        store
            .set(session, SORT_STATE_KEY, serde_json::to_value(state)?)
            .await
    }
}
