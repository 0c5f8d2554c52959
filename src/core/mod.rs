//! Core types and logic: columns, sorting, filtering, and the collaborator traits

pub mod coerce;
pub mod error;
pub mod field;
pub mod filter;
pub mod player;
pub mod service;
pub mod session;
pub mod sort;

pub use error::{QueryError, RosterError};
pub use field::{FieldValue, PlayerField};
pub use filter::{
    FilterConstraint, FilterSpec, Operator, SimpleFilter, WhereClause, build_clause,
    build_simple_clause,
};
pub use player::{Player, PlayerInput, RosterStats};
pub use service::PlayerService;
pub use session::SessionStore;
pub use sort::{SortCriterion, SortDirection, SortState};
