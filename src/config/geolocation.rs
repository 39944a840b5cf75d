//! Geolocation configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::GeoPoint;

/// Position attached to completed records and hand-offs
///
/// Disabled by default, which behaves like a refused permission prompt.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GeolocationConfig {
    #[serde(default)]
    pub enabled: bool,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,
}

impl GeolocationConfig {
    /// Validate geolocation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        let latitude = self
            .latitude
            .ok_or(ValidationError::MissingRequired("geolocation.latitude"))?;
        let longitude = self
            .longitude
            .ok_or(ValidationError::MissingRequired("geolocation.longitude"))?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::InvalidLongitude(longitude));
        }
        Ok(())
    }

    /// The configured position, if enabled and valid
    pub fn position(&self) -> Option<GeoPoint> {
        if !self.enabled {
            return None;
        }
        GeoPoint::new(self.latitude?, self.longitude?).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(latitude: Option<f64>, longitude: Option<f64>) -> GeolocationConfig {
        GeolocationConfig {
            enabled: true,
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_geolocation_disabled_by_default() {
        let config = GeolocationConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.position().is_none());
    }

    #[test]
    fn test_geolocation_requires_both_coordinates() {
        assert_eq!(
            enabled(Some(-3.2), None).validate(),
            Err(ValidationError::MissingRequired("geolocation.longitude"))
        );
    }

    #[test]
    fn test_geolocation_rejects_out_of_range() {
        assert_eq!(
            enabled(Some(95.0), Some(0.0)).validate(),
            Err(ValidationError::InvalidLatitude(95.0))
        );
    }

    #[test]
    fn test_geolocation_position() {
        let config = enabled(Some(-3.2041), Some(-52.2111));
        assert!(config.validate().is_ok());
        assert_eq!(config.position().map(|p| p.latitude), Some(-3.2041));
    }
}
