//! Cumulative multi-column sorting
//!
//! Every click on a column header calls [`SortState::toggle`]: the clicked
//! field becomes the primary key, earlier selections slide down to secondary
//! and tertiary positions, and anything beyond [`MAX_SORT_CRITERIA`] falls off.
//! Clicking a field that is already present flips its direction.
//!
//! The state is a plain value. Persisting it between requests is the caller's
//! job (see [`crate::core::session`]).

use crate::core::field::PlayerField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of remembered sort criteria
pub const MAX_SORT_CRITERIA: usize = 3;

/// Ordering applied when the user has not picked any column:
/// role descending (P, D, C, A) then best fantasy average within the role.
pub const DEFAULT_ORDER: [SortCriterion; 2] = [
    SortCriterion::new(PlayerField::Role, SortDirection::Desc),
    SortCriterion::new(PlayerField::FantasyAverage, SortDirection::Desc),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Direction used the first time a field is selected
    pub fn default_for(field: PlayerField) -> Self {
        if field.sorts_descending_first() {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One (field, direction) pair of an ORDER BY list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortCriterion {
    pub field: PlayerField,
    pub direction: SortDirection,
}

impl SortCriterion {
    pub const fn new(field: PlayerField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Ordered sort criteria, highest priority first
///
/// Holds at most [`MAX_SORT_CRITERIA`] entries and never repeats a field,
/// as long as it is only changed through [`SortState::toggle`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SortCriterion>")]
pub struct SortState(Vec<SortCriterion>);

impl SortState {
    /// The empty state, as at the start of a session
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Discard all criteria
    pub fn reset() -> Self {
        Self::new()
    }

    pub fn criteria(&self) -> &[SortCriterion] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Compute the state that follows a click on `field`
    pub fn toggle(&self, field: PlayerField) -> Self {
        let mut criteria = self.0.clone();

        let direction = match criteria.iter().position(|c| c.field == field) {
            Some(index) => criteria.remove(index).direction.flipped(),
            None => SortDirection::default_for(field),
        };

        criteria.insert(0, SortCriterion::new(field, direction));
        criteria.truncate(MAX_SORT_CRITERIA);

        Self(criteria)
    }

    /// Criteria to actually order by: the state itself, or [`DEFAULT_ORDER`]
    /// when nothing was selected
    pub fn effective_order(&self) -> Vec<SortCriterion> {
        if self.0.is_empty() {
            DEFAULT_ORDER.to_vec()
        } else {
            self.0.clone()
        }
    }
}

impl From<Vec<SortCriterion>> for SortState {
    /// Builds a state from stored criteria, dropping repeats and overflow so
    /// the invariants hold even for hand-edited session data.
    fn from(criteria: Vec<SortCriterion>) -> Self {
        let mut kept: Vec<SortCriterion> = Vec::with_capacity(MAX_SORT_CRITERIA);
        for criterion in criteria {
            if kept.len() == MAX_SORT_CRITERIA {
                break;
            }
            if !kept.iter().any(|k| k.field == criterion.field) {
                kept.push(criterion);
            }
        }
        Self(kept)
    }
}

/// Render criteria as the body of an ORDER BY clause
///
/// Column names and keywords come from closed enums only.
pub fn order_by_sql(criteria: &[SortCriterion]) -> String {
    criteria
        .iter()
        .map(|c| format!("{} {}", c.field.column(), c.direction.as_sql()))
        .collect::<Vec<_>>()
        .join(", ")
}
