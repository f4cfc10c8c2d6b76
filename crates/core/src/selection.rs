use crate::models::{Rating, RestaurantRecord, SelectionResult};
use std::cmp::Ordering;
use std::collections::BTreeSet;

pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Ranks the working set and keeps the best [`DEFAULT_RESULT_LIMIT`] records.
///
/// Records are ordered by star rating, then by rating count, both descending.
/// Records equal on both keys keep their input order.
pub fn select(records: &[RestaurantRecord]) -> SelectionResult {
    select_top(records, DEFAULT_RESULT_LIMIT)
}

pub fn select_top(records: &[RestaurantRecord], limit: usize) -> SelectionResult {
    let mut ranked: Vec<&RestaurantRecord> = records.iter().collect();
    // slice::sort_by is stable
    ranked.sort_by(|left, right| compare_ratings(&left.rating, &right.rating));
    ranked.into_iter().take(limit).cloned().collect()
}

/// Descending order on `(star_rating, count)`. NaN ratings rank lowest and
/// `-0.0` ties with `0.0`.
pub fn compare_ratings(left: &Rating, right: &Rating) -> Ordering {
    rank_key(right.star_rating)
        .total_cmp(&rank_key(left.star_rating))
        .then_with(|| right.count.cmp(&left.count))
}

fn rank_key(star_rating: f64) -> f64 {
    if star_rating.is_nan() {
        f64::NEG_INFINITY
    } else {
        star_rating + 0.0
    }
}

/// Distinct cuisine names across the whole set, case preserved, in ordinal order.
pub fn enumerate_cuisines(records: &[RestaurantRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(RestaurantRecord::cuisine_names)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
