//! Geographic coordinate value object.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A WGS84 position as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point, rejecting coordinates outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::invalid_format(
                "latitude",
                format!("{} is outside -90..=90", latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::invalid_format(
                "longitude",
                format!("{} is outside -180..=180", longitude),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}
