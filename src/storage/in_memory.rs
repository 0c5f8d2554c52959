//! In-memory implementation of SessionStore

use crate::core::SessionStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory session store
///
/// Sessions live as long as the process. Uses RwLock for thread-safe access.
///
/// There is no expiry: a session is dropped only once its last key is
/// deleted, so every client that stores something without ever clearing it
/// keeps one entry until restart. Use a persistent or expiring store for
/// long-running public deployments.
#[derive(Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, HashMap<String, Value>>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory session store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session: &Uuid, key: &str) -> Result<Option<Value>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(sessions
            .get(session)
            .and_then(|values| values.get(key))
            .cloned())
    }

    async fn set(&self, session: &Uuid, key: &str, value: Value) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        sessions
            .entry(*session)
            .or_default()
            .insert(key.to_string(), value);

        Ok(())
    }

    async fn delete(&self, session: &Uuid, key: &str) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if let Some(values) = sessions.get_mut(session) {
            values.remove(key);
            if values.is_empty() {
                sessions.remove(session);
            }
        }

        Ok(())
    }
}
