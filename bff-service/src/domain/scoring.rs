const DIFFICULTY_WEIGHT: f64 = 30.0;
const HINT_AND_ERROR_WEIGHT: i64 = 40;
const TIME_WEIGHT_MINUTES: f64 = 30.0;

/// Score of a finished game, in `[0, 100]` for non-negative input.
///
/// Harder puzzles, fewer hints/mistakes and faster solves score higher.
pub fn score(
    difficulty: i64,
    num_wrong_cells_played: i64,
    num_hints_used: i64,
    current_time_seconds: i64,
) -> i64 {
    let difficulty_score = difficulty as f64 / 1000.0 * DIFFICULTY_WEIGHT;

    let penalty = num_wrong_cells_played.saturating_add(num_hints_used);
    let hint_and_error_score = if penalty > HINT_AND_ERROR_WEIGHT {
        0
    } else {
        HINT_AND_ERROR_WEIGHT - penalty
    };

    let minutes = current_time_seconds as f64 / 60.0;
    let time_score = if minutes > TIME_WEIGHT_MINUTES {
        0.0
    } else {
        TIME_WEIGHT_MINUTES - minutes
    };

    (difficulty_score + hint_and_error_score as f64 + time_score).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_game_scores_100() {
        assert_eq!(score(1000, 0, 0, 0), 100);
    }

    #[test]
    fn test_worst_game_scores_0() {
        assert_eq!(score(0, 50, 0, 3600), 0);
    }

    #[test]
    fn test_penalty_boundary() {
        assert_eq!(score(0, 20, 20, 1800), 0);
        assert_eq!(score(0, 20, 19, 1800), 1);
    }

    #[test]
    fn test_huge_counters_saturate_penalty() {
        assert_eq!(score(0, i64::MAX, i64::MAX, 1800), 0);
        assert_eq!(score(1000, i64::MAX, 1, 0), 60);
    }

    #[test]
    fn test_partial_minutes_count() {
        // 90s is 1.5 minutes: 15 + 38 + 28.5 = 81.5, rounded up.
        assert_eq!(score(500, 1, 1, 90), 82);
    }

    #[test]
    fn test_time_beyond_half_hour_scores_nothing() {
        assert_eq!(score(1000, 0, 0, 1801), 70);
        assert_eq!(score(1000, 0, 0, 7200), 70);
    }
}
