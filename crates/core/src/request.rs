use crate::criteria::FilterCriteria;
use crate::error::FetchError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

const UK_POSTCODE_PATTERN: &str = r"^[A-Z]{1,2}[0-9][A-Z0-9]?[0-9][A-Z]{2}$";
const UK_OUTWARD_PATTERN: &str = r"^[A-Z]{1,2}[0-9][A-Z0-9]?$";

/// One restaurant search: the anchor postcode plus the user's filters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchRequest {
    pub postcode: String,
    pub criteria: FilterCriteria,
}

impl FetchRequest {
    pub fn new(postcode: &str, criteria: FilterCriteria) -> Result<Self, FetchError> {
        Ok(Self {
            postcode: normalize_postcode(postcode)?,
            criteria: criteria.normalized(),
        })
    }

    /// `{base}/{postcode}?distance=&cuisines=&min_rating=`, with the postcode as a single
    /// percent-encoded path segment and only the supplied filters in the query.
    pub fn request_url(&self, base: &Url) -> Result<Url, FetchError> {
        let mut url = base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidBaseUrl(base.to_string()))?
            .pop_if_empty()
            .push(&self.postcode);

        let pairs = self.criteria.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(key, value)| (*key, value.as_str())));
        }

        Ok(url)
    }
}

/// Canonical `OUTWARD INWARD` form of a UK postcode. A district-level
/// outward code such as `EC4M` is accepted on its own.
///
/// Accepts geocoder place names such as `"EC4M 7RF, London, England"`; only the
/// part before the first comma is used.
pub fn normalize_postcode(raw: &str) -> Result<String, FetchError> {
    let head = raw.split(',').next().unwrap_or_default();
    let compact: String = head
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| ch.to_ascii_uppercase())
        .collect();

    if Regex::new(UK_OUTWARD_PATTERN)?.is_match(&compact) {
        return Ok(compact);
    }
    if !Regex::new(UK_POSTCODE_PATTERN)?.is_match(&compact) {
        return Err(FetchError::InvalidPostcode(raw.to_string()));
    }

    let (outward, inward) = compact.split_at(compact.len() - 3);
    Ok(format!("{outward} {inward}"))
}
