//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses carry the machine-readable code and details
//! - Query building rejects bad input before anything is run

use axum::http::StatusCode;
use axum::response::IntoResponse;
use roster::prelude::*;
use serde_json::json;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_player_not_found_returns_404() {
        let err = RosterError::PlayerNotFound { id: 3 };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_query_errors_return_400() {
        let err = RosterError::Query(QueryError::InvalidOperator {
            operator: "<>".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = RosterError::Query(QueryError::UnknownField {
            field: "salary".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bad_request_returns_400() {
        assert_eq!(
            RosterError::bad_request("missing id").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_storage_errors_return_500() {
        let err = RosterError::Storage(anyhow::anyhow!("database is locked"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Error Response Tests
// =============================================================================

mod error_response_tests {
    use super::*;

    #[test]
    fn test_invalid_operator_response() {
        let response = RosterError::from(QueryError::InvalidOperator {
            operator: "!=".to_string(),
        })
        .to_response();

        assert_eq!(response.code, "INVALID_OPERATOR");
        assert_eq!(response.message, "Invalid operator '!='");
        assert_eq!(response.details, Some(json!({ "operator": "!=" })));
    }

    #[test]
    fn test_storage_error_has_no_details() {
        let response = RosterError::from(anyhow::anyhow!("disk I/O error")).to_response();
        assert_eq!(response.code, "STORAGE_ERROR");
        assert!(response.details.is_none());

        let serialized = serde_json::to_value(&response).unwrap();
        assert!(serialized.get("details").is_none());
    }

    #[test]
    fn test_into_response_status() {
        let response = RosterError::PlayerNotFound { id: 1 }.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = RosterError::from(QueryError::UnknownField {
            field: "x".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

// =============================================================================
// Query Building Errors
// =============================================================================

mod query_error_tests {
    use super::*;

    fn spec(entries: &[(&str, &str, FieldValue)]) -> FilterSpec {
        entries
            .iter()
            .map(|(field, op, value)| {
                (field.to_string(), FilterConstraint::new(*op, value.clone()))
            })
            .collect()
    }

    #[test]
    fn test_rejected_operators() {
        for op in ["!=", "<>", "IN", "; DROP TABLE players", ""] {
            let err = build_clause(&spec(&[("price", op, FieldValue::from(5))])).unwrap_err();
            assert!(
                matches!(err, QueryError::InvalidOperator { ref operator } if operator == op),
                "{:?} should be rejected, got {:?}",
                op,
                err
            );
        }
    }

    #[test]
    fn test_unknown_field_is_reported_by_name() {
        let err = build_clause(&spec(&[
            ("name", "=", FieldValue::from("Rossi")),
            ("price); DELETE FROM players; --", "=", FieldValue::from(1)),
        ]))
        .unwrap_err();

        assert_eq!(
            err,
            QueryError::UnknownField {
                field: "price); DELETE FROM players; --".to_string()
            }
        );
    }

    #[test]
    fn test_bad_entry_rejected_even_when_value_is_empty() {
        let err = build_clause(&spec(&[("team", ">>", FieldValue::Null)])).unwrap_err();
        assert!(matches!(err, QueryError::InvalidOperator { .. }));
    }

    #[test]
    fn test_simple_clause_rejects_unknown_field() {
        let mut filters = indexmap::IndexMap::new();
        filters.insert("club".to_string(), SimpleFilter::from(FieldValue::from("Inter")));

        let err = build_simple_clause(&filters).unwrap_err();
        assert!(matches!(err, QueryError::UnknownField { .. }));
    }

    #[test]
    fn test_sort_field_parse_error() {
        let err = "salary".parse::<PlayerField>().unwrap_err();
        assert_eq!(RosterError::from(err).error_code(), "UNKNOWN_FIELD");
    }
}
