// Public API - what other modules can use
pub use engine::{
    best_win_ratio_country, find_by_id, mean_body_mass_index, median_height, rank_sorted,
};
pub use errors::StatsError;

// Internal modules
mod engine;
mod errors;
