//! HTTP handlers for the roster API
//!
//! Handlers return [`RosterError`] on failure, which renders as the JSON
//! error body with the matching status code.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use super::session::SessionHandle;
use crate::core::coerce::{coerce_bool, coerce_bool_value};
use crate::core::session::{load_sort_state, save_sort_state};
use crate::core::{
    FieldValue, FilterSpec, Player, PlayerField, PlayerInput, PlayerService, RosterError,
    RosterStats, SessionStore, SimpleFilter, SortState, build_clause, build_simple_clause,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub players: Arc<dyn PlayerService>,
    pub sessions: Arc<dyn SessionStore>,
    /// Name of the cookie carrying the session id
    pub cookie_name: Arc<str>,
}

/// Query string of the roster listing
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Field to toggle in the session's sort state
    pub sort: Option<String>,
    /// Any non-empty value clears the sort state
    pub reset_sort: Option<String>,
    pub role: Option<String>,
    pub only_set_piece_takers: Option<String>,
    pub only_targets: Option<String>,
    pub only_out_of_list: Option<String>,
}

impl ListParams {
    /// Equality filters selected through the query string
    pub fn quick_filters(&self) -> IndexMap<String, SimpleFilter> {
        let mut filters = IndexMap::new();

        if let Some(role) = self.role.as_deref().filter(|r| !r.is_empty()) {
            filters.insert(PlayerField::Role.to_string(), SimpleFilter::from(FieldValue::from(role)));
        }

        let flags = [
            (PlayerField::SetPieceTaker, &self.only_set_piece_takers),
            (PlayerField::Target, &self.only_targets),
            (PlayerField::OutOfList, &self.only_out_of_list),
        ];
        for (field, flag) in flags {
            if flag.as_deref().is_some_and(coerce_bool) {
                filters.insert(field.to_string(), SimpleFilter::from(FieldValue::Boolean(true)));
            }
        }

        filters
    }
}

/// Response for the roster listing
#[derive(Debug, Serialize)]
pub struct ListPlayersResponse {
    pub data: Vec<Player>,
    pub stats: RosterStats,
    /// Sort state of the session after this request
    pub sort: SortState,
}

/// Response for the filter search endpoint
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub data: Vec<Player>,
    pub count: usize,
}

/// Unwrap a JSON body, reporting any rejection as a 400
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, RosterError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| RosterError::bad_request(rejection.body_text()))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "fanta-roster",
    }))
}

/// List players with the session's cumulative sort and the quick filters
pub async fn list_players(
    State(state): State<AppState>,
    session: SessionHandle,
    Query(params): Query<ListParams>,
) -> Result<(HeaderMap, Json<ListPlayersResponse>), RosterError> {
    // parsed up front so a bad field rejects the whole request, reset included
    let toggled: Option<PlayerField> = params
        .sort
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .transpose()?;

    let mut sort = load_sort_state(state.sessions.as_ref(), &session.id).await?;
    let mut changed = false;

    if params.reset_sort.as_deref().is_some_and(|v| !v.is_empty()) {
        tracing::debug!(session = %session.id, "resetting sort state");
        sort = SortState::reset();
        changed = true;
    }

    if let Some(field) = toggled {
        sort = sort.toggle(field);
        changed = true;
        tracing::debug!(session = %session.id, field = %field, criteria = sort.len(), "toggled sort");
    }

    if changed {
        save_sort_state(state.sessions.as_ref(), &session.id, &sort).await?;
    }

    let clause = build_simple_clause(&params.quick_filters())?;
    let players = state
        .players
        .query(&clause, &sort.effective_order())
        .await?;
    let stats = RosterStats::from_players(&players);

    Ok((
        session.cookie_headers(&state.cookie_name),
        Json(ListPlayersResponse {
            data: players,
            stats,
            sort,
        }),
    ))
}

pub async fn create_player(
    State(state): State<AppState>,
    payload: Result<Json<PlayerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Player>), RosterError> {
    let input = json_body(payload)?;
    if input.name.trim().is_empty() {
        return Err(RosterError::bad_request("Player name must not be empty"));
    }

    let player = state.players.create(input).await?;
    tracing::info!(id = player.id, name = %player.name, "player created");

    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Player>, RosterError> {
    state
        .players
        .get(id)
        .await?
        .map(Json)
        .ok_or(RosterError::PlayerNotFound { id })
}

/// Replace every field of a player
pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<PlayerInput>, JsonRejection>,
) -> Result<Json<Player>, RosterError> {
    let input = json_body(payload)?;
    if input.name.trim().is_empty() {
        return Err(RosterError::bad_request("Player name must not be empty"));
    }

    let player = state
        .players
        .update(id, input)
        .await?
        .ok_or(RosterError::PlayerNotFound { id })?;
    tracing::info!(id, "player updated");

    Ok(Json(player))
}

pub async fn delete_player(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, RosterError> {
    if !state.players.delete(id).await? {
        return Err(RosterError::PlayerNotFound { id });
    }
    tracing::info!(id, "player deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Filter with the full `{field: {operator, value}}` descriptor map
pub async fn search_players(
    State(state): State<AppState>,
    payload: Result<Json<FilterSpec>, JsonRejection>,
) -> Result<Json<SearchResponse>, RosterError> {
    let spec = json_body(payload)?;
    let clause = build_clause(&spec)?;
    let players = state
        .players
        .query(&clause, &SortState::new().effective_order())
        .await?;

    Ok(Json(SearchResponse {
        count: players.len(),
        data: players,
    }))
}

fn toggle_response(status: StatusCode, success: bool) -> Response {
    (status, Json(json!({ "success": success }))).into_response()
}

fn player_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Flip the target flag of one player from the listing page
///
/// Body: `{"id": <player id>, "status": <flag>}`. The flag accepts booleans,
/// numbers and the usual true tokens.
pub async fn toggle_target(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = payload else {
        return toggle_response(StatusCode::BAD_REQUEST, false);
    };
    let id = body.get("id").and_then(player_id);
    let status = body.get("status").filter(|v| !v.is_null());

    let (Some(id), Some(status)) = (id, status) else {
        tracing::debug!(body = %body, "toggle_target called without id or status");
        return toggle_response(StatusCode::BAD_REQUEST, false);
    };
    let target = coerce_bool_value(status);

    match state.players.set_target(id, target).await {
        Ok(true) => {
            tracing::info!(id, target, "target flag updated");
            toggle_response(StatusCode::OK, true)
        }
        Ok(false) => toggle_response(StatusCode::NOT_FOUND, false),
        Err(e) => RosterError::Storage(e).into_response(),
    }
}
