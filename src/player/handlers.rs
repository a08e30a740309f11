use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::PlayerModel,
    service::PlayerService,
    types::{PlayerListRequest, StatisticsResponse},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for listing players
///
/// POST /players
/// Returns players sorted by rank, optionally capped by the `limit` field
#[instrument(name = "list_players", skip(state))]
pub async fn list_players(
    State(state): State<AppState>,
    Json(request): Json<PlayerListRequest>,
) -> Result<Json<Vec<PlayerModel>>, AppError> {
    info!(limit = ?request.limit, "Listing players");

    // Use injected repository from app state
    let service = PlayerService::new(Arc::clone(&state.player_repository));
    let players = service.list_players(request).await?;

    info!(player_count = players.len(), "Players listed successfully");

    Ok(Json(players))
}

/// HTTP handler for catalog statistics
///
/// GET /players/statistics
/// Returns best win-ratio country, mean BMI and median height
#[instrument(name = "get_statistics", skip(state))]
pub async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<StatisticsResponse>, AppError> {
    info!("Computing catalog statistics");

    let service = PlayerService::new(Arc::clone(&state.player_repository));
    let statistics = service.statistics().await?;

    info!(country = %statistics.country, "Statistics computed successfully");

    Ok(Json(statistics))
}

/// HTTP handler for fetching a single player
///
/// GET /players/:id
/// Returns the matching player or 404
#[instrument(name = "find_player", skip(state))]
pub async fn find_player(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PlayerModel>, AppError> {
    info!(player_id = id, "Fetching player");

    let service = PlayerService::new(Arc::clone(&state.player_repository));
    let player = service.find_player(id).await?;

    info!(player_id = player.id, "Player fetched successfully");

    Ok(Json(player))
}
