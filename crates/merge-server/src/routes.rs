use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use merge_core::engine::{GameState, Move};
use serde::Deserialize;
use tracing::warn;

use crate::app::AppState;

#[derive(Deserialize, Default)]
pub struct MoveQuery {
    direction: Option<String>,
}

/// GET /api/game - current state, creating a game on first access.
pub async fn get_game(State(state): State<AppState>) -> Json<GameState> {
    Json(state.with_game(|game| game.state()))
}

/// POST /api/move?direction={up,down,left,right}
///
/// Directions are the four lowercase literals, case-sensitive. Rejected
/// requests mutate nothing.
pub async fn post_move(
    State(state): State<AppState>,
    Query(query): Query<MoveQuery>,
) -> Result<Json<GameState>, (StatusCode, String)> {
    let direction = query
        .direction
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "Direction is required".to_string()))?;
    let direction = match direction.as_str() {
        "up" => Move::Up,
        "down" => Move::Down,
        "left" => Move::Left,
        "right" => Move::Right,
        other => {
            warn!(direction = other, "rejected move request");
            return Err((StatusCode::BAD_REQUEST, "Invalid direction".to_string()));
        }
    };
    Ok(Json(state.with_game(|game| game.apply(direction))))
}

/// POST /api/new - replace the current game with a fresh one.
pub async fn new_game(State(state): State<AppState>) -> Json<GameState> {
    Json(state.with_game(|game| game.reset()))
}

/// GET /api/health
pub async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use merge_core::rules::Rules;

    fn app_state() -> AppState {
        AppState::new(Rules::default(), Some(7))
    }

    fn direction_query(direction: &str) -> Query<MoveQuery> {
        Query(MoveQuery {
            direction: Some(direction.to_string()),
        })
    }

    #[tokio::test]
    async fn move_on_fresh_game_returns_state() {
        let state = app_state();
        let response = post_move(State(state), direction_query("up"))
            .await
            .unwrap()
            .0;
        assert_eq!(response.board.len(), 8);
        assert_eq!(response.board[0].len(), 8);
        assert!(!response.over);
        assert!(response.can_move);
    }

    #[tokio::test]
    async fn move_without_direction_is_rejected() {
        let state = app_state();
        let err = post_move(State(state.clone()), Query(MoveQuery::default()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1, "Direction is required");
        // The rejected request mutated nothing: a later read sees an
        // untouched game.
        let fresh = get_game(State(state)).await.0;
        assert_eq!(fresh.score, 0);
    }

    #[tokio::test]
    async fn unknown_direction_is_rejected() {
        let state = app_state();
        for bad in ["sideways", "Up", "LEFT", ""] {
            let err = post_move(State(state.clone()), direction_query(bad))
                .await
                .unwrap_err();
            assert_eq!(err.0, StatusCode::BAD_REQUEST);
            assert_eq!(err.1, "Invalid direction");
        }
    }

    #[tokio::test]
    async fn get_game_lazily_creates_one_game() {
        let state = app_state();
        let first = get_game(State(state.clone())).await.0;
        let seeded: usize = first
            .board
            .iter()
            .flatten()
            .filter(|&&v| v != 0)
            .count();
        assert_eq!(seeded, 8);
        // A second read observes the same game, not a new one.
        let second = get_game(State(state)).await.0;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn new_game_discards_progress() {
        let state = app_state();
        for direction in ["left", "up", "right", "down"] {
            let _ = post_move(State(state.clone()), direction_query(direction)).await;
        }
        let fresh = new_game(State(state)).await.0;
        assert_eq!(fresh.score, 0);
        assert!(!fresh.over);
        let seeded: usize = fresh
            .board
            .iter()
            .flatten()
            .filter(|&&v| v != 0)
            .count();
        assert_eq!(seeded, 8);
    }

    #[tokio::test]
    async fn health_is_plaintext_ok() {
        assert_eq!(health().await, "OK");
    }

    #[tokio::test]
    async fn state_serializes_with_wire_field_names() {
        let state = app_state();
        let body = serde_json::to_value(get_game(State(state)).await.0).unwrap();
        for key in ["board", "score", "won", "over", "canMove"] {
            assert!(body.get(key).is_some(), "missing key {key}");
        }
    }
}
