// Library crate for the tennis player catalog server
// This file exposes the public API for integration tests

pub mod player;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use player::{models::PlayerModel, repository::PlayerRepository, PlayerService};
pub use shared::{AppError, AppState};
pub use stats::StatsError;
