//! Filter specifications and WHERE clause building
//!
//! A filter specification maps field names to `{operator, value}` pairs, e.g.
//!
//! ```json
//! {
//!     "name":  { "operator": "LIKE", "value": "Ross" },
//!     "price": { "operator": "<",    "value": 15 }
//! }
//! ```
//!
//! [`build_clause`] turns it into `name LIKE ? AND price < ?` with parameters
//! `["%Ross%", 15]`. Entries with a `null` or `""` value add no constraint, so
//! an untouched form field never filters anything.
//!
//! Field names and operators are resolved against closed enums before any
//! text is produced; values only ever travel as bound parameters.

use crate::core::error::QueryError;
use crate::core::field::{FieldValue, PlayerField};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators accepted in filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    Like,
}

impl Operator {
    pub fn as_sql(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Like => "LIKE",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" => Ok(Operator::Eq),
            "<" => Ok(Operator::Lt),
            ">" => Ok(Operator::Gt),
            "<=" => Ok(Operator::Le),
            ">=" => Ok(Operator::Ge),
            op if op.eq_ignore_ascii_case("like") => Ok(Operator::Like),
            _ => Err(QueryError::InvalidOperator {
                operator: s.to_string(),
            }),
        }
    }
}

/// Constraint on one field, as received from the request layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConstraint {
    pub operator: String,
    /// Missing means `null`, i.e. no constraint
    #[serde(default)]
    pub value: FieldValue,
}

impl FilterConstraint {
    pub fn new(operator: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            operator: operator.into(),
            value: value.into(),
        }
    }

    pub fn eq(value: impl Into<FieldValue>) -> Self {
        Self::new("=", value)
    }
}

/// Quick-filter entry: either a bare value (meaning `=`) or a full constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimpleFilter {
    Constraint(FilterConstraint),
    Literal(FieldValue),
}

impl From<FieldValue> for SimpleFilter {
    fn from(value: FieldValue) -> Self {
        SimpleFilter::Literal(value)
    }
}

impl From<FilterConstraint> for SimpleFilter {
    fn from(constraint: FilterConstraint) -> Self {
        SimpleFilter::Constraint(constraint)
    }
}

/// Filter specification keyed by field name, in insertion order
pub type FilterSpec = IndexMap<String, FilterConstraint>;

/// A WHERE clause body and its bound parameters
///
/// `params[i]` binds the i-th `?` in `text`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    pub text: String,
    pub params: Vec<FieldValue>,
}

impl WhereClause {
    /// An empty clause matches every row
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// `""` or `" WHERE <text>"`, ready to append to a SELECT
    pub fn sql_suffix(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.text)
        }
    }
}

/// Translate a filter specification into a parameterized clause
///
/// Every entry's field and operator are checked first, so a bad entry is
/// rejected even when its value is empty and no partial clause is returned.
pub fn build_clause(specs: &FilterSpec) -> Result<WhereClause, QueryError> {
    let resolved = specs
        .iter()
        .map(|(field, constraint)| {
            let field: PlayerField = field.parse()?;
            let operator: Operator = constraint.operator.parse()?;
            Ok((field, operator, &constraint.value))
        })
        .collect::<Result<Vec<_>, QueryError>>()?;

    let mut fragments = Vec::with_capacity(resolved.len());
    let mut params = Vec::with_capacity(resolved.len());

    for (field, operator, value) in resolved {
        if value.is_empty() {
            continue;
        }

        fragments.push(format!("{} {} ?", field.column(), operator.as_sql()));
        params.push(match operator {
            Operator::Like => FieldValue::Text(format!("%{}%", value.to_pattern_text())),
            _ => value.clone(),
        });
    }

    tracing::debug!(constraints = fragments.len(), "built filter clause");

    Ok(WhereClause {
        text: fragments.join(" AND "),
        params,
    })
}

/// Like [`build_clause`], but bare values are accepted and mean `=`
pub fn build_simple_clause(
    filters: &IndexMap<String, SimpleFilter>,
) -> Result<WhereClause, QueryError> {
    let specs: FilterSpec = filters
        .iter()
        .map(|(field, filter)| {
            let constraint = match filter {
                SimpleFilter::Constraint(c) => c.clone(),
                SimpleFilter::Literal(v) => FilterConstraint::eq(v.clone()),
            };
            (field.clone(), constraint)
        })
        .collect();

    build_clause(&specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(entries: &[(&str, FilterConstraint)]) -> FilterSpec {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_operator_tokens() {
        for (token, op) in [
            ("=", Operator::Eq),
            ("<", Operator::Lt),
            (">", Operator::Gt),
            ("<=", Operator::Le),
            (">=", Operator::Ge),
            ("LIKE", Operator::Like),
            ("like", Operator::Like),
        ] {
            assert_eq!(token.parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_operator_rejects_unknown_tokens() {
        for token in ["!=", "<>", "OR", "= 1 OR 1 =", ""] {
            assert_eq!(
                token.parse::<Operator>().unwrap_err(),
                QueryError::InvalidOperator {
                    operator: token.to_string()
                }
            );
        }
    }

    #[test]
    fn test_comparison_passes_value_through() {
        let clause = build_clause(&spec(&[("price", FilterConstraint::new("<", 15))])).unwrap();
        assert_eq!(clause.text, "price < ?");
        assert_eq!(clause.params, vec![FieldValue::Integer(15)]);
    }

    #[test]
    fn test_like_wraps_value_in_wildcards() {
        let clause =
            build_clause(&spec(&[("name", FilterConstraint::new("LIKE", "Ross"))])).unwrap();
        assert_eq!(clause.text, "name LIKE ?");
        assert_eq!(clause.params, vec![FieldValue::Text("%Ross%".into())]);
    }

    #[test]
    fn test_empty_value_adds_no_constraint() {
        let clause = build_clause(&spec(&[("note", FilterConstraint::eq(""))])).unwrap();
        assert!(clause.is_empty());
        assert!(clause.params.is_empty());
        assert_eq!(clause.sql_suffix(), "");

        let clause = build_clause(&spec(&[(
            "price",
            FilterConstraint::new(">=", FieldValue::Null),
        )]))
        .unwrap();
        assert!(clause.is_empty());
    }

    #[test]
    fn test_fragments_joined_in_insertion_order() {
        let clause = build_clause(&spec(&[
            ("team", FilterConstraint::new("like", "Inter")),
            ("note", FilterConstraint::eq("")),
            ("starting_likelihood", FilterConstraint::new(">=", 70)),
            ("set_piece_taker", FilterConstraint::eq(true)),
        ]))
        .unwrap();

        assert_eq!(
            clause.text,
            "team LIKE ? AND starting_likelihood >= ? AND set_piece_taker = ?"
        );
        assert_eq!(
            clause.params,
            vec![
                FieldValue::Text("%Inter%".into()),
                FieldValue::Integer(70),
                FieldValue::Boolean(true),
            ]
        );
        assert_eq!(
            clause.sql_suffix(),
            " WHERE team LIKE ? AND starting_likelihood >= ? AND set_piece_taker = ?"
        );
    }

    #[test]
    fn test_invalid_operator_rejects_whole_spec() {
        let err = build_clause(&spec(&[
            ("price", FilterConstraint::new("<", 15)),
            ("name", FilterConstraint::new("!=", "Ross")),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidOperator {
                operator: "!=".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_operator_rejected_even_with_empty_value() {
        let err = build_clause(&spec(&[("note", FilterConstraint::new("OR 1=1 --", ""))]))
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidOperator { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = build_clause(&spec(&[(
            "1=1; DROP TABLE players; --",
            FilterConstraint::eq(1),
        )]))
        .unwrap_err();
        assert!(matches!(err, QueryError::UnknownField { .. }));
    }

    #[test]
    fn test_no_specs_matches_all() {
        let clause = build_clause(&FilterSpec::new()).unwrap();
        assert_eq!(clause, WhereClause::default());
    }

    #[test]
    fn test_simple_clause_literals_mean_equals() {
        let mut filters = IndexMap::new();
        filters.insert("role".to_string(), SimpleFilter::from(FieldValue::from("A")));
        filters.insert("target".to_string(), SimpleFilter::from(FieldValue::from(true)));
        filters.insert(
            "price".to_string(),
            SimpleFilter::from(FilterConstraint::new("<=", 20)),
        );

        let clause = build_simple_clause(&filters).unwrap();
        assert_eq!(clause.text, "role = ? AND target = ? AND price <= ?");
        assert_eq!(
            clause.params,
            vec![
                FieldValue::Text("A".into()),
                FieldValue::Boolean(true),
                FieldValue::Integer(20),
            ]
        );
    }

    #[test]
    fn test_simple_clause_rejects_unknown_field() {
        let mut filters = IndexMap::new();
        filters.insert("Ruolo".to_string(), SimpleFilter::from(FieldValue::from("A")));
        assert!(matches!(
            build_simple_clause(&filters),
            Err(QueryError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_spec_deserializes_from_json() {
        let specs: FilterSpec = serde_json::from_value(json!({
            "name": { "operator": "LIKE", "value": "Ross" },
            "price": { "operator": "<", "value": 15 }
        }))
        .unwrap();
        let clause = build_clause(&specs).unwrap();
        assert_eq!(clause.text, "name LIKE ? AND price < ?");
    }

    #[test]
    fn test_missing_value_means_no_constraint() {
        let specs: FilterSpec = serde_json::from_value(json!({
            "team": { "operator": "=" },
            "price": { "operator": "<", "value": 15 }
        }))
        .unwrap();
        assert_eq!(specs["team"].value, FieldValue::Null);

        let clause = build_clause(&specs).unwrap();
        assert_eq!(clause.text, "price < ?");
        assert_eq!(clause.params, vec![FieldValue::Integer(15)]);
    }

    #[test]
    fn test_simple_filter_deserializes_both_shapes() {
        let filters: IndexMap<String, SimpleFilter> = serde_json::from_value(json!({
            "role": "D",
            "price": { "operator": ">", "value": 5 }
        }))
        .unwrap();
        assert_eq!(filters["role"], SimpleFilter::Literal(FieldValue::from("D")));
        assert_eq!(
            filters["price"],
            SimpleFilter::Constraint(FilterConstraint::new(">", 5))
        );
    }
}
