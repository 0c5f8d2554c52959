//! SQLite storage backend using sqlx.
//!
//! Provides `SqlitePlayerService`, a [`PlayerService`] backed by a
//! `sqlx::SqlitePool`. Every operation borrows a pooled connection for the
//! length of one statement (or one transaction) and hands it back on all
//! exit paths, errors included.
//!
//! # Schema
//!
//! Players live in a single `players` table whose columns match
//! [`PlayerField`](crate::core::PlayerField) one to one. Booleans are stored
//! as `INTEGER` 0/1.

use crate::core::field::FieldValue;
use crate::core::filter::WhereClause;
use crate::core::player::{Player, PlayerInput};
use crate::core::sort::{SortCriterion, order_by_sql};
use crate::core::PlayerService;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteExecutor, SqlitePool};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Pool and schema management
// ---------------------------------------------------------------------------

/// Open a pool, creating the database file if it does not exist yet.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("Invalid database url '{}'", url))?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database '{}'", url))
}

/// Apply the required table (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS players (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            team TEXT,
            role TEXT,
            role_detail TEXT,
            out_of_list INTEGER NOT NULL DEFAULT 0,
            set_piece_taker INTEGER NOT NULL DEFAULT 0,
            average_rating REAL,
            fantasy_average REAL,
            projected_fantasy_average REAL,
            starting_likelihood INTEGER,
            price INTEGER,
            target INTEGER NOT NULL DEFAULT 0,
            note TEXT NOT NULL DEFAULT ''
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create players table: {}", e))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

const PLAYER_SELECT: &str = "SELECT id, name, team, role, role_detail, out_of_list, set_piece_taker, \
     average_rating, fantasy_average, projected_fantasy_average, starting_likelihood, price, target, note \
     FROM players";

const PLAYER_INSERT: &str = "INSERT INTO players (name, team, role, role_detail, out_of_list, set_piece_taker, \
     average_rating, fantasy_average, projected_fantasy_average, starting_likelihood, price, target, note) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

const PLAYER_UPDATE: &str = "UPDATE players SET name = ?, team = ?, role = ?, role_detail = ?, \
     out_of_list = ?, set_piece_taker = ?, average_rating = ?, fantasy_average = ?, \
     projected_fantasy_average = ?, starting_likelihood = ?, price = ?, target = ?, note = ? \
     WHERE id = ?";

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Bind the thirteen data columns of a player, in table order.
fn bind_input<'q>(query: SqliteQuery<'q>, input: &'q PlayerInput) -> SqliteQuery<'q> {
    query
        .bind(&input.name)
        .bind(&input.team)
        .bind(&input.role)
        .bind(&input.role_detail)
        .bind(input.out_of_list)
        .bind(input.set_piece_taker)
        .bind(input.average_rating)
        .bind(input.fantasy_average)
        .bind(input.projected_fantasy_average)
        .bind(input.starting_likelihood)
        .bind(input.price)
        .bind(input.target)
        .bind(&input.note)
}

async fn insert_one<'e, E>(executor: E, input: &PlayerInput) -> Result<i64>
where
    E: SqliteExecutor<'e>,
{
    let result = bind_input(sqlx::query(PLAYER_INSERT), input)
        .execute(executor)
        .await
        .map_err(|e| anyhow!("Failed to insert player: {}", e))?;

    Ok(result.last_insert_rowid())
}

/// Compose the full SELECT for a filtered, ordered listing.
fn listing_sql(clause: &WhereClause, order: &[SortCriterion]) -> String {
    let mut sql = format!("{}{}", PLAYER_SELECT, clause.sql_suffix());
    if !order.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&order_by_sql(order));
    }
    sql
}

// ---------------------------------------------------------------------------
// SqlitePlayerService
// ---------------------------------------------------------------------------

/// Player storage service backed by SQLite.
///
/// # Example
///
/// ```rust,ignore
/// use roster::storage::sqlite::{connect, ensure_schema, SqlitePlayerService};
///
/// let pool = connect("sqlite://fanta-roster.db", 5).await?;
/// ensure_schema(&pool).await?;
/// let service = SqlitePlayerService::new(pool);
/// let player = service.create(PlayerInput::new("Rossi")).await?;
/// ```
#[derive(Clone, Debug)]
pub struct SqlitePlayerService {
    pool: SqlitePool,
}

impl SqlitePlayerService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerService for SqlitePlayerService {
    async fn create(&self, input: PlayerInput) -> Result<Player> {
        let id = insert_one(&self.pool, &input).await?;

        self.get(id)
            .await?
            .ok_or_else(|| anyhow!("Failed to read back created player"))
    }

    async fn get(&self, id: i64) -> Result<Option<Player>> {
        let sql = format!("{} WHERE id = ?", PLAYER_SELECT);
        sqlx::query_as::<_, Player>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to get player: {}", e))
    }

    async fn query(&self, clause: &WhereClause, order: &[SortCriterion]) -> Result<Vec<Player>> {
        let sql = listing_sql(clause, order);
        tracing::debug!(sql = %sql, params = clause.params.len(), "querying players");

        let mut query = sqlx::query_as::<_, Player>(&sql);
        for param in &clause.params {
            query = match param {
                FieldValue::Boolean(b) => query.bind(*b),
                FieldValue::Integer(i) => query.bind(*i),
                FieldValue::Float(f) => query.bind(*f),
                FieldValue::Text(s) => query.bind(s.as_str()),
                FieldValue::Null => query.bind(None::<String>),
            };
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to query players: {}", e))
    }

    async fn update(&self, id: i64, input: PlayerInput) -> Result<Option<Player>> {
        let result = bind_input(sqlx::query(PLAYER_UPDATE), &input)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to update player: {}", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete player: {}", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_target(&self, id: i64, target: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE players SET target = ? WHERE id = ?")
            .bind(target)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to update target flag: {}", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn replace_all(&self, players: Vec<PlayerInput>) -> Result<usize> {
        // Dropping the transaction without commit rolls it back
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| anyhow!("Failed to begin transaction: {}", e))?;

        sqlx::query("DELETE FROM players")
            .execute(&mut *tx)
            .await
            .map_err(|e| anyhow!("Failed to clear players: {}", e))?;

        for input in &players {
            insert_one(&mut *tx, input).await?;
        }

        tx.commit()
            .await
            .map_err(|e| anyhow!("Failed to commit import: {}", e))?;

        Ok(players.len())
    }

    async fn count(&self) -> Result<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to count players: {}", e))?;

        Ok(count.max(0) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::PlayerField;
    use crate::core::sort::{DEFAULT_ORDER, SortDirection};

    #[test]
    fn listing_sql_without_filters_or_order() {
        let sql = listing_sql(&WhereClause::default(), &[]);
        assert_eq!(sql, PLAYER_SELECT);
    }

    #[test]
    fn listing_sql_with_clause_and_order() {
        let clause = WhereClause {
            text: "price < ?".to_string(),
            params: vec![FieldValue::Integer(15)],
        };
        let sql = listing_sql(&clause, &DEFAULT_ORDER);
        assert!(sql.ends_with(" FROM players WHERE price < ? ORDER BY role DESC, fantasy_average DESC"));
    }

    #[test]
    fn listing_sql_single_criterion() {
        let order = [SortCriterion::new(PlayerField::Name, SortDirection::Asc)];
        let sql = listing_sql(&WhereClause::default(), &order);
        assert!(sql.ends_with("FROM players ORDER BY name ASC"));
    }
}
