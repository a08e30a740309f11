use super::StatsError;
use crate::player::models::PlayerModel;

/// Match outcome markers as stored in a player's `last` results.
/// Any other value is ignored by aggregation.
const WIN_MARKER: i32 = 1;
const LOSS_MARKER: i32 = 0;

/// Win/loss totals accumulated for a single country.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CountryAggregate {
    code: String,
    total_wins: u32,
    total_losses: u32,
}

impl CountryAggregate {
    fn new(code: String) -> Self {
        Self {
            code,
            total_wins: 0,
            total_losses: 0,
        }
    }

    /// (wins - losses) / (wins + losses).
    ///
    /// A country with zero recorded outcomes ranks as negative infinity so
    /// it can never win the ranking.
    fn win_ratio(&self) -> f64 {
        let total = self.total_wins + self.total_losses;
        if total == 0 {
            return f64::NEG_INFINITY;
        }
        (self.total_wins as f64 - self.total_losses as f64) / total as f64
    }
}

/// Returns the players sorted ascending by rank, on a private copy.
///
/// The sort is stable: equal ranks keep their original relative order.
/// A `limit` caps the result length; an absent limit returns the full
/// catalog.
pub fn rank_sorted(players: &[PlayerModel], limit: Option<usize>) -> Vec<PlayerModel> {
    let mut sorted = players.to_vec();
    sorted.sort_by_key(|player| player.data.rank);

    if let Some(limit) = limit {
        sorted.truncate(limit);
    }
    sorted
}

/// Linear lookup by id over the snapshot.
pub fn find_by_id(players: &[PlayerModel], id: i64) -> Result<PlayerModel, StatsError> {
    players
        .iter()
        .find(|player| player.id == id)
        .cloned()
        .ok_or(StatsError::NotFound(id))
}

/// Median of the given heights.
///
/// Sorts a private copy, so the result is invariant under any permutation
/// of the input. For an even count the median is the mean of the two
/// middle elements.
pub fn median_height(heights: &[f64]) -> Result<f64, StatsError> {
    if heights.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let mut sorted = heights.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 != 0 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Arithmetic mean of every player's body-mass index contribution.
///
/// Contributions are computed independently and reduced only once all are
/// known; no shared accumulator is updated mid-scan.
pub fn mean_body_mass_index(players: &[PlayerModel]) -> Result<f64, StatsError> {
    if players.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let total: f64 = players.iter().map(body_mass_index).sum();
    Ok(total / players.len() as f64)
}

/// weight / height^2, or zero when either measurement is missing.
///
/// A record with invalid body data still counts toward the mean's
/// denominator; it contributes zero rather than being excluded.
fn body_mass_index(player: &PlayerModel) -> f64 {
    let weight = player.data.weight;
    let height = player.data.height;
    if weight > 0 && height > 0 {
        weight as f64 / (height as f64).powi(2)
    } else {
        0.0
    }
}

/// Code of the country whose players have the best combined win ratio.
pub fn best_win_ratio_country(players: &[PlayerModel]) -> Result<String, StatsError> {
    let mut aggregates = aggregate_by_country(players).into_iter();

    // No players means no aggregates.
    let mut best = aggregates.next().ok_or(StatsError::EmptyInput)?;
    for aggregate in aggregates {
        // Only a strictly better ratio replaces the current best, so ties
        // keep the first-encountered country.
        if aggregate.win_ratio() > best.win_ratio() {
            best = aggregate;
        }
    }

    Ok(best.code)
}

/// Groups win/loss totals by country code, preserving the order in which
/// each country first appears. That order is the tie-break for the ranking.
fn aggregate_by_country(players: &[PlayerModel]) -> Vec<CountryAggregate> {
    let mut aggregates: Vec<CountryAggregate> = Vec::new();

    for player in players {
        let index = match aggregates
            .iter()
            .position(|aggregate| aggregate.code == player.country.code)
        {
            Some(index) => index,
            None => {
                aggregates.push(CountryAggregate::new(player.country.code.clone()));
                aggregates.len() - 1
            }
        };

        let aggregate = &mut aggregates[index];
        for outcome in &player.data.last {
            match *outcome {
                WIN_MARKER => aggregate.total_wins += 1,
                LOSS_MARKER => aggregate.total_losses += 1,
                _ => {}
            }
        }
    }

    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::models::{Country, PlayerData, PlayerModel};
    use rstest::rstest;

    fn player(id: i64, country_code: &str, rank: i32, last: Vec<i32>) -> PlayerModel {
        player_with_body(id, country_code, rank, 80000, 185, last)
    }

    fn player_with_body(
        id: i64,
        country_code: &str,
        rank: i32,
        weight: i32,
        height: i32,
        last: Vec<i32>,
    ) -> PlayerModel {
        PlayerModel {
            id,
            firstname: "Test".to_string(),
            lastname: format!("Player-{}", id),
            shortname: format!("T.P{}", id),
            sex: "M".to_string(),
            country: Country {
                code: country_code.to_string(),
                picture: String::new(),
            },
            picture: String::new(),
            data: PlayerData {
                rank,
                points: 1000,
                weight,
                height,
                age: 30,
                last,
            },
        }
    }

    #[test]
    fn rank_sorted_orders_by_rank_ascending() {
        let players = vec![
            player(1, "USA", 52, vec![]),
            player(2, "SRB", 2, vec![]),
            player(3, "ESP", 10, vec![]),
            player(4, "SUI", 21, vec![]),
            player(5, "FRA", 1, vec![]),
        ];

        let sorted = rank_sorted(&players, None);

        let ranks: Vec<i32> = sorted.iter().map(|p| p.data.rank).collect();
        assert_eq!(ranks, vec![1, 2, 10, 21, 52]);
    }

    #[test]
    fn rank_sorted_limit_caps_result_length() {
        let players = vec![
            player(1, "USA", 52, vec![]),
            player(2, "SRB", 2, vec![]),
            player(3, "ESP", 10, vec![]),
            player(4, "SUI", 21, vec![]),
            player(5, "FRA", 1, vec![]),
        ];

        let sorted = rank_sorted(&players, Some(2));

        assert_eq!(sorted.len(), 2);
        assert!(sorted[0].data.rank <= sorted[1].data.rank);
    }

    #[test]
    fn rank_sorted_limit_beyond_population_returns_everything() {
        let players = vec![player(1, "USA", 52, vec![]), player(2, "SRB", 2, vec![])];

        let sorted = rank_sorted(&players, Some(10));

        assert_eq!(sorted.len(), 2);
    }

    #[test]
    fn rank_sorted_is_stable_for_equal_ranks() {
        let players = vec![
            player(1, "USA", 5, vec![]),
            player(2, "SRB", 5, vec![]),
            player(3, "ESP", 1, vec![]),
        ];

        let sorted = rank_sorted(&players, None);

        // Players 1 and 2 share a rank and must keep their original order.
        let ids: Vec<i64> = sorted.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn rank_sorted_does_not_mutate_the_input() {
        let players = vec![player(1, "USA", 52, vec![]), player(2, "SRB", 2, vec![])];

        let _ = rank_sorted(&players, Some(1));

        assert_eq!(players[0].id, 1);
        assert_eq!(players[1].id, 2);
    }

    #[test]
    fn find_by_id_returns_the_exact_record() {
        let players = vec![player(17, "ESP", 1, vec![1, 0]), player(52, "SRB", 2, vec![1])];

        let found = find_by_id(&players, 17).unwrap();

        assert_eq!(found, players[0]);
    }

    #[test]
    fn find_by_id_misses_with_not_found() {
        let players = vec![player(17, "ESP", 1, vec![])];

        let result = find_by_id(&players, 999);

        assert_eq!(result, Err(StatsError::NotFound(999)));
    }

    #[rstest]
    #[case(vec![185.0, 185.0, 185.0, 180.0, 178.0, 180.0], 182.5)]
    #[case(vec![178.0, 180.0, 180.0, 185.0, 185.0, 185.0], 182.5)]
    #[case(vec![185.0, 178.0, 185.0, 180.0, 185.0, 180.0], 182.5)]
    #[case(vec![188.0, 185.0, 183.0, 175.0, 185.0], 185.0)]
    #[case(vec![170.0], 170.0)]
    fn median_height_cases(#[case] heights: Vec<f64>, #[case] expected: f64) {
        assert_eq!(median_height(&heights).unwrap(), expected);
    }

    #[test]
    fn median_height_rejects_empty_input() {
        assert_eq!(median_height(&[]), Err(StatsError::EmptyInput));
    }

    #[test]
    fn mean_body_mass_index_single_player() {
        let players = vec![player_with_body(1, "SRB", 1, 80000, 188, vec![])];

        let mean = mean_body_mass_index(&players).unwrap();

        assert!((mean - 80000.0 / (188.0f64 * 188.0)).abs() < 1e-12);
    }

    #[test]
    fn mean_body_mass_index_rejects_empty_input() {
        assert_eq!(mean_body_mass_index(&[]), Err(StatsError::EmptyInput));
    }

    #[test]
    fn invalid_body_data_contributes_zero_but_still_counts() {
        let players = vec![
            player_with_body(1, "SRB", 1, 80000, 188, vec![]),
            player_with_body(2, "USA", 2, 0, 185, vec![]),
        ];

        let mean = mean_body_mass_index(&players).unwrap();

        // The second player dilutes the mean instead of being excluded.
        assert!((mean - 80000.0 / (188.0f64 * 188.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn best_win_ratio_country_prefers_higher_ratio() {
        let players = vec![
            player(1, "SRB", 1, vec![1, 1, 1, 1, 1]),
            player(2, "USA", 2, vec![0, 1, 0, 0, 1]),
        ];

        let country = best_win_ratio_country(&players).unwrap();

        assert_eq!(country, "SRB");
    }

    #[test]
    fn best_win_ratio_country_combines_players_of_one_country() {
        // USA totals 5 wins / 5 losses (ratio 0), SUI 4 wins / 1 loss (0.6).
        let players = vec![
            player(1, "USA", 1, vec![0, 1, 0, 0, 1]),
            player(2, "SUI", 2, vec![1, 1, 1, 0, 1]),
            player(3, "USA", 3, vec![0, 1, 1, 1, 0]),
        ];

        let country = best_win_ratio_country(&players).unwrap();

        assert_eq!(country, "SUI");
    }

    #[test]
    fn best_win_ratio_country_breaks_ties_by_first_appearance() {
        let players = vec![
            player(1, "ESP", 1, vec![1, 0]),
            player(2, "FRA", 2, vec![0, 1]),
        ];

        let country = best_win_ratio_country(&players).unwrap();

        assert_eq!(country, "ESP");
    }

    #[test]
    fn country_without_outcomes_never_wins() {
        let players = vec![
            player(1, "ESP", 1, vec![]),
            player(2, "FRA", 2, vec![0, 0, 1]),
        ];

        let country = best_win_ratio_country(&players).unwrap();

        // FRA is losing overall but ESP has nothing on record.
        assert_eq!(country, "FRA");
    }

    #[test]
    fn unknown_outcome_markers_are_ignored() {
        let players = vec![
            player(1, "ESP", 1, vec![1, 7, -3, 0]),
            player(2, "FRA", 2, vec![1, 1, 0, 0]),
        ];

        let country = best_win_ratio_country(&players).unwrap();

        // ESP counts one win and one loss; the 7 and -3 entries are noise.
        // Both countries tie at ratio 0, so the first encountered wins.
        assert_eq!(country, "ESP");
    }

    #[test]
    fn best_win_ratio_country_rejects_empty_input() {
        assert_eq!(best_win_ratio_country(&[]), Err(StatsError::EmptyInput));
    }
}
