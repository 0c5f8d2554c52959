//! Route table of the roster API

use super::handlers::{
    AppState, create_player, delete_player, get_player, health_check, list_players,
    search_players, toggle_target, update_player,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build the roster routes
///
/// - GET /health - Liveness check
/// - GET /players - Listing with session sort and quick filters
/// - POST /players - Create a player
/// - GET/PUT/DELETE /players/{id} - Single player
/// - POST /players/search - Listing filtered by a descriptor map
/// - POST /api/toggle_target - Flip the target flag from the listing page
pub fn build_roster_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/players", get(list_players).post(create_player))
        .route("/players/search", post(search_players))
        .route(
            "/players/{id}",
            get(get_player).put(update_player).delete(delete_player),
        )
        .route("/api/toggle_target", post(toggle_target))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
