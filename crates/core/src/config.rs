use crate::models::Location;
use crate::selection::DEFAULT_RESULT_LIMIT;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/restaurants/";
pub const DEFAULT_PLACEHOLDER_LOGO: &str = "frontend/images/cutlery.png";

#[derive(Debug, Clone)]
pub struct FinderOptions {
    pub api_url: String,
    pub result_limit: usize,
    /// Initial map center, before any postcode is chosen.
    pub default_center: Location,
    pub default_zoom: f64,
    pub postcode_zoom: f64,
    pub filter_zoom: f64,
    pub record_zoom: f64,
    pub placeholder_logo: String,
    pub request_timeout: Option<Duration>,
}

impl Default for FinderOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
            default_center: Location::new(51.516554352367486, -0.10306130000000001),
            default_zoom: 7.0,
            postcode_zoom: 15.0,
            filter_zoom: 12.0,
            record_zoom: 17.0,
            placeholder_logo: DEFAULT_PLACEHOLDER_LOGO.to_string(),
            request_timeout: None,
        }
    }
}
