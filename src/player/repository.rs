use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument, warn};

use super::models::{Country, PlayerData, PlayerModel};
use crate::shared::AppError;

/// Bundled player catalog used by the in-memory store.
const SEED_PLAYERS: &str = include_str!("../../data/players.json");

/// Trait for player store operations
///
/// The backing technology is opaque to callers: a static list, a JSON file,
/// or a database all surface the same full-snapshot query. The engine reads
/// the snapshot and never writes back.
#[async_trait]
pub trait PlayerRepository {
    async fn all_players(&self) -> Result<Vec<PlayerModel>, AppError>;
}

/// In-memory implementation of PlayerRepository for development and testing
///
/// The catalog is read-only, so the records are held in a plain `Vec` with
/// no interior locking.
pub struct InMemoryPlayerRepository {
    players: Vec<PlayerModel>,
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
        }
    }

    /// Creates an in-memory repository with pre-populated players
    pub fn with_players(players: Vec<PlayerModel>) -> Self {
        Self { players }
    }

    /// Parses a JSON array of player records
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let players: Vec<PlayerModel> = serde_json::from_str(json)?;
        Ok(Self { players })
    }

    /// Creates a repository pre-populated with the bundled catalog
    pub fn seeded() -> Result<Self, serde_json::Error> {
        Self::from_json(SEED_PLAYERS)
    }

    /// Returns the current number of players in the repository
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    #[instrument(skip(self))]
    async fn all_players(&self) -> Result<Vec<PlayerModel>, AppError> {
        debug!(
            player_count = self.players.len(),
            "Fetching player snapshot from memory"
        );

        Ok(self.players.clone())
    }
}

/// PostgreSQL implementation of PlayerRepository
///
/// Match outcomes are stored as a JSON-encoded array in the `last_results`
/// column and decoded on read.
pub struct PostgresPlayerRepository {
    pool: PgPool,
}

impl PostgresPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    #[instrument(skip(self))]
    async fn all_players(&self) -> Result<Vec<PlayerModel>, AppError> {
        debug!("Fetching player snapshot from database");

        let rows = sqlx::query(
            "SELECT id, firstname, lastname, shortname, sex, country_code, country_picture, \
             picture, rank, points, weight, height, age, last_results FROM players",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch players from database");
            AppError::DatabaseError(e.to_string())
        })?;

        let mut players = Vec::with_capacity(rows.len());
        for row in rows {
            let last_results: String = row.get("last_results");
            let last: Vec<i32> = serde_json::from_str(&last_results).map_err(|e| {
                warn!(error = %e, "Failed to decode last_results column");
                AppError::DatabaseError(e.to_string())
            })?;

            players.push(PlayerModel {
                id: row.get("id"),
                firstname: row.get("firstname"),
                lastname: row.get("lastname"),
                shortname: row.get("shortname"),
                sex: row.get("sex"),
                country: Country {
                    code: row.get("country_code"),
                    picture: row.get("country_picture"),
                },
                picture: row.get("picture"),
                data: PlayerData {
                    rank: row.get("rank"),
                    points: row.get("points"),
                    weight: row.get("weight"),
                    height: row.get("height"),
                    age: row.get("age"),
                    last,
                },
            });
        }

        debug!(player_count = players.len(), "Players fetched from database");
        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_repository() {
        let repo = InMemoryPlayerRepository::new();

        let players = repo.all_players().await.unwrap();
        assert!(players.is_empty());
        assert_eq!(repo.player_count(), 0);
    }

    #[tokio::test]
    async fn test_seeded_repository_contains_full_catalog() {
        let repo = InMemoryPlayerRepository::seeded().unwrap();

        let players = repo.all_players().await.unwrap();
        assert_eq!(players.len(), 5);
        assert_eq!(repo.player_count(), 5);

        // Every id in the catalog is unique.
        let ids: std::collections::HashSet<i64> = players.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), players.len());
    }

    #[tokio::test]
    async fn test_snapshot_is_a_copy() {
        let repo = InMemoryPlayerRepository::seeded().unwrap();

        let mut first = repo.all_players().await.unwrap();
        first.clear();

        let second = repo.all_players().await.unwrap();
        assert_eq!(second.len(), 5);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let result = InMemoryPlayerRepository::from_json("{\"not\": \"an array\"}");
        assert!(result.is_err());
    }
}
