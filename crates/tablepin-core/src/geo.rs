//! Great-circle distance math and display formatting.

/// Mean Earth radius in kilometers, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees — the un-swapped view of a stored
/// `[longitude, latitude]` document pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Great-circle distance between two points via the haversine formula.
#[must_use]
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Formats a distance for display: under 1 km in whole meters, 1–10 km with
/// one decimal place, above 10 km in whole kilometers.
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        #[allow(clippy::cast_possible_truncation)]
        let meters = (km * 1000.0).round() as i64;
        format!("{meters}m")
    } else if km <= 10.0 {
        format!("{km:.1}km")
    } else {
        #[allow(clippy::cast_possible_truncation)]
        let whole = km.round() as i64;
        format!("{whole}km")
    }
}
