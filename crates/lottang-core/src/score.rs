//! Win-history score policy.
//!
//! A first-place win weighs 10, a second-place win 3; the sum is adjusted by
//! a recency factor derived from how many years ago the store last won.

const WIN1_WEIGHT: f64 = 10.0;
const WIN2_WEIGHT: f64 = 3.0;

/// Draws per year, for converting a draw-number gap into years.
const DRAWS_PER_YEAR: f64 = 52.0;

/// Recency adjustment: recent winners are boosted, stale ones discounted.
/// Unknown recency is neutral.
#[must_use]
pub fn recency_factor(years_since: Option<f64>) -> f64 {
    match years_since {
        None => 1.0,
        Some(y) if y <= 1.0 => 1.2,
        Some(y) if y <= 3.0 => 1.1,
        Some(y) if y <= 5.0 => 1.0,
        Some(_) => 0.9,
    }
}

/// Compute the score for a store's win history, rounded to two decimals.
#[must_use]
pub fn compute_score(win1_cnt: u32, win2_cnt: u32, years_since: Option<f64>) -> f64 {
    let base = f64::from(win1_cnt) * WIN1_WEIGHT + f64::from(win2_cnt) * WIN2_WEIGHT;
    round2(base * recency_factor(years_since))
}

/// Approximate years between the newest draw seen and a store's last win,
/// in 0.1-year steps. One draw per week is assumed.
#[must_use]
pub fn years_since_draw(max_draw: u32, last_win_draw: u32) -> f64 {
    let gap = f64::from(max_draw.saturating_sub(last_win_draw));
    round1(gap / DRAWS_PER_YEAR)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_weights() {
        // Neutral recency: 2*10 + 3*3 = 29
        assert!((compute_score(2, 3, Some(4.0)) - 29.0).abs() < f64::EPSILON);
    }

    #[test]
    fn recent_win_is_boosted() {
        // 10 * 1.2 = 12
        assert!((compute_score(1, 0, Some(0.5)) - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn three_year_band() {
        // 10 * 1.1 = 11
        assert!((compute_score(1, 0, Some(2.0)) - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stale_win_is_discounted() {
        // 10 * 0.9 = 9
        assert!((compute_score(1, 0, Some(7.0)) - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_recency_is_neutral() {
        assert!((compute_score(0, 2, None) - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn score_rounds_to_two_decimals() {
        // 3 * 1.1 = 3.3000000000000003 without rounding
        let score = compute_score(0, 1, Some(2.0));
        assert!((score - 3.3).abs() < 1e-9);
    }

    #[test]
    fn years_since_draw_rounds_to_tenths() {
        assert!((years_since_draw(1100, 1048) - 1.0).abs() < f64::EPSILON);
        assert!((years_since_draw(1100, 1090) - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn years_since_draw_saturates() {
        // A last win newer than max_draw (possible on odd input files) is 0.
        assert!((years_since_draw(1000, 1005) - 0.0).abs() < f64::EPSILON);
    }
}
