use crate::geo::distance_miles;
use crate::models::{Location, RestaurantRecord};
use serde::{Deserialize, Serialize};

/// Value the cuisine control uses for "no cuisine constraint".
pub const CUISINE_ALL: &str = "all";

/// Filter selections forwarded to the backend as query parameters.
///
/// The client-side pipeline never excludes records by these values; see
/// [`FilterCriteria::matches`] for the backend's own semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FilterCriteria {
    /// Upper bound in miles from the postcode origin.
    pub distance: Option<f64>,
    /// Pipe-separated cuisine names, matched case-insensitively by the backend.
    pub cuisine: Option<String>,
    pub min_rating: Option<f64>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.distance.is_none() && self.cuisine.is_none() && self.min_rating.is_none()
    }

    /// Drops values that mean "not supplied": zero or non-finite numbers,
    /// blank cuisine and the [`CUISINE_ALL`] sentinel.
    pub fn normalized(&self) -> Self {
        Self {
            distance: self.distance.filter(|value| is_supplied(*value)),
            cuisine: self
                .cuisine
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty() && *value != CUISINE_ALL)
                .map(str::to_string),
            min_rating: self.min_rating.filter(|value| is_supplied(*value)),
        }
    }

    /// Query pairs in `distance`, `cuisines`, `min_rating` order, present values only.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let normalized = self.normalized();
        let mut pairs = Vec::new();
        if let Some(distance) = normalized.distance {
            pairs.push(("distance", distance.to_string()));
        }
        if let Some(cuisine) = normalized.cuisine {
            pairs.push(("cuisines", cuisine));
        }
        if let Some(min_rating) = normalized.min_rating {
            pairs.push(("min_rating", min_rating.to_string()));
        }
        pairs
    }

    /// Fills absent distance and rating with the backend's defaults.
    pub fn with_backend_defaults(&self) -> Self {
        let normalized = self.normalized();
        Self {
            distance: normalized.distance.or(Some(BACKEND_DEFAULT_DISTANCE_MILES)),
            cuisine: normalized.cuisine,
            min_rating: normalized.min_rating.or(Some(BACKEND_DEFAULT_MIN_RATING)),
        }
    }

    /// Backend inclusion check for one record relative to the postcode origin.
    pub fn matches(&self, record: &RestaurantRecord, origin: Location) -> bool {
        if let Some(limit) = self.distance {
            if distance_miles(origin, record.position()) > limit {
                return false;
            }
        }

        if let Some(wanted) = self.cuisine.as_deref() {
            let wanted: Vec<String> = wanted
                .split('|')
                .map(|name| name.trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect();
            let offered = record
                .cuisine_names()
                .any(|name| wanted.contains(&name.to_lowercase()));
            if !wanted.is_empty() && !offered {
                return false;
            }
        }

        match self.min_rating {
            Some(min_rating) => record.rating.star_rating >= min_rating,
            None => true,
        }
    }
}

pub const BACKEND_DEFAULT_DISTANCE_MILES: f64 = 3.0;
pub const BACKEND_DEFAULT_MIN_RATING: f64 = 3.0;

fn is_supplied(value: f64) -> bool {
    value.is_finite() && value != 0.0
}
