use crate::models::Location;

const EARTH_RADIUS_MILES: f64 = 3_958.761_3;

/// Great-circle distance between two coordinates, in miles.
///
/// Spherical (haversine) model. It can differ from an ellipsoidal geodesic by
/// up to about 0.5%, so points right at a distance bound may fall either side.
pub fn distance_miles(from: Location, to: Location) -> f64 {
    let (lat1, lat2) = (from.latitude.to_radians(), to.latitude.to_radians());
    let delta_lat = lat2 - lat1;
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * a.sqrt().min(1.0).asin()
}
