use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};

/// Ordered output of the selection pipeline; what the map and list render.
pub type SelectionResult = Vec<RestaurantRecord>;

/// One restaurant as returned by the search backend.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    /// Absent or empty means the placeholder logo is shown.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub logo_url: Option<String>,
    pub rating: Rating,
    #[serde(default)]
    pub cuisines: Vec<Cuisine>,
    pub address: Address,
    #[serde(default)]
    pub is_test_restaurant: bool,
}

impl RestaurantRecord {
    pub fn position(&self) -> Location {
        self.address.location
    }

    pub fn cuisine_names(&self) -> impl Iterator<Item = &str> {
        self.cuisines.iter().map(|cuisine| cuisine.name.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub star_rating: f64,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<f64>,
}

impl Rating {
    pub fn new(star_rating: f64, count: u32) -> Self {
        Self {
            star_rating,
            count,
            user_rating: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Cuisine {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_name: Option<String>,
}

impl Cuisine {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unique_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub first_line: String,
    pub postal_code: String,
    pub location: Location,
}

/// WGS84 coordinate. Decodes from `{latitude, longitude}` or a GeoJSON point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(from = "LocationRepr")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `[longitude, latitude]`, the order map widgets take.
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocationRepr {
    Plain { latitude: f64, longitude: f64 },
    GeoJson { coordinates: [f64; 2] },
}

impl From<LocationRepr> for Location {
    fn from(value: LocationRepr) -> Self {
        match value {
            LocationRepr::Plain {
                latitude,
                longitude,
            } => Location::new(latitude, longitude),
            LocationRepr::GeoJson {
                coordinates: [longitude, latitude],
            } => Location::new(latitude, longitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_decodes_backend_layout() {
        let value = json!({
            "id": 12,
            "name": "Pizza Place",
            "logoUrl": "https://example.test/logo.png",
            "rating": {"starRating": 4.5, "count": 10, "userRating": null},
            "cuisines": [{"name": "Pizza", "uniqueName": "pizza"}],
            "address": {
                "city": "London",
                "firstLine": "1 High Street",
                "postalCode": "EC4M 7RF",
                "location": {"type": "Point", "coordinates": [-0.1, 51.5]}
            },
            "isTestRestaurant": false
        });

        let record: RestaurantRecord = serde_json::from_value(value).expect("record decodes");
        assert_eq!(record.id, Some(12));
        assert_eq!(record.rating.count, 10);
        assert_eq!(record.address.location, Location::new(51.5, -0.1));
        assert_eq!(record.cuisines[0].unique_name.as_deref(), Some("pizza"));
    }

    #[test]
    fn empty_logo_url_is_absent() {
        let value = json!({
            "name": "No Logo",
            "logoUrl": "",
            "rating": {"starRating": 3.0, "count": 1},
            "address": {
                "firstLine": "2 Low Road",
                "postalCode": "N1 9GU",
                "location": {"latitude": 51.53, "longitude": -0.12}
            }
        });

        let record: RestaurantRecord = serde_json::from_value(value).expect("record decodes");
        assert_eq!(record.logo_url, None);
        assert!(record.cuisines.is_empty());
        assert!(!record.is_test_restaurant);
    }

    #[test]
    fn missing_rating_is_rejected() {
        let value = json!({
            "name": "Broken",
            "address": {
                "firstLine": "3 Lane",
                "postalCode": "SW1A 1AA",
                "location": {"latitude": 51.5, "longitude": -0.14}
            }
        });

        assert!(serde_json::from_value::<RestaurantRecord>(value).is_err());
    }
}
