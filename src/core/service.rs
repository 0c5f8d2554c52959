//! Storage service trait for players

use crate::core::filter::WhereClause;
use crate::core::player::{Player, PlayerInput};
use crate::core::sort::SortCriterion;
use anyhow::Result;
use async_trait::async_trait;

/// Service trait for managing stored players
///
/// Implementations own the storage engine. Clauses and orderings handed to
/// [`PlayerService::query`] are already validated, so an implementation only
/// has to splice their text and bind their parameters.
#[async_trait]
pub trait PlayerService: Send + Sync {
    /// Insert a new player; the identity is assigned by the storage engine
    async fn create(&self, input: PlayerInput) -> Result<Player>;

    /// Get a player by identity
    async fn get(&self, id: i64) -> Result<Option<Player>>;

    /// List players matching `clause`, ordered by `order`
    async fn query(&self, clause: &WhereClause, order: &[SortCriterion]) -> Result<Vec<Player>>;

    /// Replace every field of an existing player
    ///
    /// Returns `None` when there is no player with this identity.
    async fn update(&self, id: i64, input: PlayerInput) -> Result<Option<Player>>;

    /// Delete a player, returning whether it existed
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Set only the target flag, returning whether the player existed
    async fn set_target(&self, id: i64, target: bool) -> Result<bool>;

    /// Wipe the table and insert `players` atomically, returning the count
    async fn replace_all(&self, players: Vec<PlayerInput>) -> Result<usize>;

    /// Number of stored players
    async fn count(&self) -> Result<usize>;
}
