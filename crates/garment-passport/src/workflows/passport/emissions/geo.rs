use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A named geographic point used as a supply-chain leg endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    pub country: String,
}

impl Waypoint {
    pub fn new(lat: f64, lng: f64, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            name: name.into(),
            country: country.into(),
        }
    }

    /// Reject non-finite coordinates before any distance math runs, so the
    /// estimator never has to propagate NaN distances.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.lat.is_finite() {
            return Err(CoordinateError::NonFinite {
                name: self.name.clone(),
                axis: "latitude",
            });
        }
        if !self.lng.is_finite() {
            return Err(CoordinateError::NonFinite {
                name: self.name.clone(),
                axis: "longitude",
            });
        }
        Ok(())
    }
}

/// Validation failure for merchant-supplied coordinates.
#[derive(Debug, thiserror::Error)]
pub enum CoordinateError {
    #[error("waypoint '{name}' has a non-finite {axis}")]
    NonFinite { name: String, axis: &'static str },
}

/// Great-circle distance in kilometres between two waypoints.
pub fn haversine_km(from: &Waypoint, to: &Waypoint) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
