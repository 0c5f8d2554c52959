//! # Fanta Roster
//!
//! A fantasy-football roster manager served as a JSON API.
//!
//! ## Features
//!
//! - **Cumulative Sorting**: Each session keeps up to three sort criteria,
//!   the most recently clicked column first
//! - **Safe Filtering**: Filter descriptors are checked against a closed set
//!   of columns and operators; values are always bound as parameters
//! - **SQLite Storage**: Players live in a single `players` table via sqlx
//! - **CSV Seeding**: An empty database is filled from a spreadsheet export
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roster::prelude::*;
//! use roster::storage::sqlite::{connect, ensure_schema};
//!
//! let pool = connect("sqlite://fanta-roster.db", 5).await?;
//! ensure_schema(&pool).await?;
//!
//! ServerBuilder::new()
//!     .with_player_service(SqlitePlayerService::new(pool))
//!     .serve("127.0.0.1:5000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        FieldValue, FilterConstraint, FilterSpec, Operator, Player, PlayerField, PlayerInput,
        PlayerService, QueryError, RosterError, RosterStats, SessionStore, SimpleFilter,
        SortCriterion, SortDirection, SortState, WhereClause, build_clause, build_simple_clause,
        coerce::coerce_bool,
    };

    // === Storage ===
    pub use crate::storage::{InMemorySessionStore, SqlitePlayerService};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
