//! Player columns and scalar field values

use crate::core::error::QueryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A scalar value bound into a query as a parameter
///
/// Deserialized untagged, so plain JSON scalars map directly:
/// `"Ross"` → `Text`, `15` → `Integer`, `6.5` → `Float`, `true` → `Boolean`,
/// `null` → `Null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl FieldValue {
    /// `null` and `""` carry no constraint when used as a filter value
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Textual form used when the value is embedded in a LIKE pattern
    pub fn to_pattern_text(&self) -> String {
        match self {
            FieldValue::Boolean(b) => (if *b { "1" } else { "0" }).to_string(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Null => String::new(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Null
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// The closed set of player columns
///
/// This is the only source of column names that ever reaches query text.
/// The API identifier and the SQL column are the same string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerField {
    Id,
    Name,
    Team,
    Role,
    RoleDetail,
    OutOfList,
    SetPieceTaker,
    AverageRating,
    FantasyAverage,
    ProjectedFantasyAverage,
    StartingLikelihood,
    Price,
    Target,
    Note,
}

impl PlayerField {
    pub const ALL: [PlayerField; 14] = [
        PlayerField::Id,
        PlayerField::Name,
        PlayerField::Team,
        PlayerField::Role,
        PlayerField::RoleDetail,
        PlayerField::OutOfList,
        PlayerField::SetPieceTaker,
        PlayerField::AverageRating,
        PlayerField::FantasyAverage,
        PlayerField::ProjectedFantasyAverage,
        PlayerField::StartingLikelihood,
        PlayerField::Price,
        PlayerField::Target,
        PlayerField::Note,
    ];

    /// SQL column name
    pub fn column(self) -> &'static str {
        match self {
            PlayerField::Id => "id",
            PlayerField::Name => "name",
            PlayerField::Team => "team",
            PlayerField::Role => "role",
            PlayerField::RoleDetail => "role_detail",
            PlayerField::OutOfList => "out_of_list",
            PlayerField::SetPieceTaker => "set_piece_taker",
            PlayerField::AverageRating => "average_rating",
            PlayerField::FantasyAverage => "fantasy_average",
            PlayerField::ProjectedFantasyAverage => "projected_fantasy_average",
            PlayerField::StartingLikelihood => "starting_likelihood",
            PlayerField::Price => "price",
            PlayerField::Target => "target",
            PlayerField::Note => "note",
        }
    }

    /// Fields whose first sort click orders best-first (descending)
    pub fn sorts_descending_first(self) -> bool {
        matches!(
            self,
            PlayerField::AverageRating
                | PlayerField::FantasyAverage
                | PlayerField::Price
                | PlayerField::StartingLikelihood
        )
    }
}

impl fmt::Display for PlayerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for PlayerField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerField::ALL
            .into_iter()
            .find(|field| field.column() == s)
            .ok_or_else(|| QueryError::UnknownField {
                field: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_field_parses_from_its_column() {
        for field in PlayerField::ALL {
            assert_eq!(field.column().parse::<PlayerField>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = "price; DROP TABLE players".parse::<PlayerField>().unwrap_err();
        assert_eq!(
            err,
            QueryError::UnknownField {
                field: "price; DROP TABLE players".to_string()
            }
        );
        assert!("Price".parse::<PlayerField>().is_err());
        assert!("".parse::<PlayerField>().is_err());
    }

    #[test]
    fn test_descending_first_set() {
        let descending: Vec<_> = PlayerField::ALL
            .into_iter()
            .filter(|f| f.sorts_descending_first())
            .collect();
        assert_eq!(
            descending,
            vec![
                PlayerField::AverageRating,
                PlayerField::FantasyAverage,
                PlayerField::StartingLikelihood,
                PlayerField::Price,
            ]
        );
        assert!(!PlayerField::ProjectedFantasyAverage.sorts_descending_first());
    }

    #[test]
    fn test_field_serde_uses_column_names() {
        assert_eq!(
            serde_json::to_value(PlayerField::RoleDetail).unwrap(),
            json!("role_detail")
        );
        let parsed: PlayerField = serde_json::from_value(json!("set_piece_taker")).unwrap();
        assert_eq!(parsed, PlayerField::SetPieceTaker);
    }

    #[test]
    fn test_field_value_untagged() {
        let values: Vec<FieldValue> =
            serde_json::from_value(json!(["Ross", 15, 6.5, true, null])).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Text("Ross".into()),
                FieldValue::Integer(15),
                FieldValue::Float(6.5),
                FieldValue::Boolean(true),
                FieldValue::Null,
            ]
        );
    }

    #[test]
    fn test_field_value_emptiness() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(!FieldValue::Text(" ".into()).is_empty());
        assert!(!FieldValue::Integer(0).is_empty());
        assert!(!FieldValue::Boolean(false).is_empty());
    }

    #[test]
    fn test_pattern_text() {
        assert_eq!(FieldValue::Integer(15).to_pattern_text(), "15");
        assert_eq!(FieldValue::Text("Ross".into()).to_pattern_text(), "Ross");
        assert_eq!(FieldValue::Boolean(true).to_pattern_text(), "1");
    }
}
