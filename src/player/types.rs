use serde::{Deserialize, Serialize};

/// Request payload for listing players
///
/// `limit` caps the number of returned players; when absent the full
/// catalog is returned.
#[derive(Debug, Default, Deserialize)]
pub struct PlayerListRequest {
    pub limit: Option<u32>,
}

/// Aggregate statistics over the whole catalog
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    /// Country whose players have the best combined win ratio
    pub country: String,
    pub mean_body_mass_index: f64,
    pub median_player_height: f64,
}
