use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("player with id = {0} is not found")]
    NotFound(i64),

    #[error("no players to aggregate")]
    EmptyInput,
}
