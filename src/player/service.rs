use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    models::PlayerModel,
    repository::PlayerRepository,
    types::{PlayerListRequest, StatisticsResponse},
};
use crate::{shared::AppError, stats};

/// Service for player catalog queries
///
/// Takes one read-only snapshot from the injected store per call and hands
/// it to the aggregation engine; nothing here mutates the catalog.
pub struct PlayerService {
    repository: Arc<dyn PlayerRepository + Send + Sync>,
}

impl PlayerService {
    pub fn new(repository: Arc<dyn PlayerRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Lists players sorted by rank, best first, optionally limited
    #[instrument(skip(self))]
    pub async fn list_players(
        &self,
        request: PlayerListRequest,
    ) -> Result<Vec<PlayerModel>, AppError> {
        debug!(limit = ?request.limit, "Listing players");

        let players = self.repository.all_players().await?;
        let players = stats::rank_sorted(&players, request.limit.map(|limit| limit as usize));

        info!(player_count = players.len(), "Players listed successfully");
        Ok(players)
    }

    /// Looks up a single player by id
    #[instrument(skip(self))]
    pub async fn find_player(&self, id: i64) -> Result<PlayerModel, AppError> {
        debug!(player_id = id, "Looking up player");

        let players = self.repository.all_players().await?;
        let player = stats::find_by_id(&players, id)?;

        info!(player_id = player.id, shortname = %player.shortname, "Player found");
        Ok(player)
    }

    /// Computes the three aggregate statistics over one snapshot
    ///
    /// The computations are independent of each other, so each runs on its
    /// own blocking task; the response is assembled only once all three have
    /// joined, and the first observed failure wins.
    #[instrument(skip(self))]
    pub async fn statistics(&self) -> Result<StatisticsResponse, AppError> {
        debug!("Computing catalog statistics");

        let players = self.repository.all_players().await?;

        let heights: Vec<f64> = players.iter().map(PlayerModel::height_cm).collect();
        let bmi_players = players.clone();
        let ratio_players = players;

        let (median_height, mean_bmi, country) = tokio::try_join!(
            tokio::task::spawn_blocking(move || stats::median_height(&heights)),
            tokio::task::spawn_blocking(move || stats::mean_body_mass_index(&bmi_players)),
            tokio::task::spawn_blocking(move || stats::best_win_ratio_country(&ratio_players)),
        )
        .map_err(|err| {
            warn!(error = %err, "Statistics task failed to join");
            AppError::Internal
        })?;

        let response = StatisticsResponse {
            country: country?,
            mean_body_mass_index: mean_bmi?,
            median_player_height: median_height?,
        };

        info!(
            country = %response.country,
            median_player_height = response.median_player_height,
            "Statistics computed successfully"
        );
        Ok(response)
    }
}
