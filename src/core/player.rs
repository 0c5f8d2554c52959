//! Player records

use crate::core::coerce::{blank_as_none, lenient_bool, lenient_opt_f64, lenient_opt_i64};
use serde::{Deserialize, Serialize};

/// A stored player row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub team: Option<String>,
    /// Primary role: P, D, C or A
    pub role: Option<String>,
    pub role_detail: Option<String>,
    /// Withdrawn or otherwise unavailable
    pub out_of_list: bool,
    /// Takes penalties or set pieces
    pub set_piece_taker: bool,
    pub average_rating: Option<f64>,
    pub fantasy_average: Option<f64>,
    pub projected_fantasy_average: Option<f64>,
    /// 0-100 likelihood of starting
    pub starting_likelihood: Option<i64>,
    pub price: Option<i64>,
    /// Marked as a drafting priority
    pub target: bool,
    pub note: String,
}

/// Payload for inserting or fully updating a player
///
/// Accepts loosely-typed form values: flags may be booleans, numbers or
/// `"1"`/`"true"` strings, and numeric fields may be blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub team: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub role_detail: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub out_of_list: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub set_piece_taker: bool,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub fantasy_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub projected_fantasy_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub starting_likelihood: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub target: bool,
    #[serde(default)]
    pub note: String,
}

impl PlayerInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl From<Player> for PlayerInput {
    fn from(player: Player) -> Self {
        Self {
            name: player.name,
            team: player.team,
            role: player.role,
            role_detail: player.role_detail,
            out_of_list: player.out_of_list,
            set_piece_taker: player.set_piece_taker,
            average_rating: player.average_rating,
            fantasy_average: player.fantasy_average,
            projected_fantasy_average: player.projected_fantasy_average,
            starting_likelihood: player.starting_likelihood,
            price: player.price,
            target: player.target,
            note: player.note,
        }
    }
}

/// Dashboard totals over a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterStats {
    pub total: usize,
    pub targets: usize,
    /// Sum of known prices
    pub budget_spent: i64,
}

impl RosterStats {
    pub fn from_players(players: &[Player]) -> Self {
        Self {
            total: players.len(),
            targets: players.iter().filter(|p| p.target).count(),
            budget_spent: players.iter().filter_map(|p| p.price).sum(),
        }
    }
}
