use serde::{Deserialize, Serialize};

/// Country a player competes for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,    // ISO-style code, e.g. "SRB"
    pub picture: String, // Flag asset URL
}

/// Numeric profile attached to a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    pub rank: i32,
    pub points: i32,
    pub weight: i32, // Grams
    pub height: i32, // Centimeters
    pub age: i32,
    /// Recent match outcomes: 1 = win, 0 = loss.
    /// Aggregation ignores any other value.
    pub last: Vec<i32>,
}

/// Catalog record for a single player
///
/// Records are supplied whole by the store and are never created, mutated,
/// or deleted by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerModel {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub shortname: String, // e.g. "N.DJO"
    pub sex: String,       // "M" or "F"
    pub country: Country,
    pub picture: String, // Portrait asset URL
    pub data: PlayerData,
}

impl PlayerModel {
    /// Height in centimeters as a float, for aggregation.
    pub fn height_cm(&self) -> f64 {
        self.data.height as f64
    }
}
