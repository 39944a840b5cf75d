//! Geolocation Adapters
//!
//! The assistant runs without a browser, so positions come from
//! configuration. An unconfigured provider behaves like a user who
//! refused the permission prompt.

use async_trait::async_trait;

use crate::domain::foundation::GeoPoint;
use crate::ports::{GeolocationProvider, GeolocationUnavailable};

/// Reports a fixed position, or always refuses when built with `denied()`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGeolocation {
    position: Option<GeoPoint>,
}

impl FixedGeolocation {
    pub fn at(position: GeoPoint) -> Self {
        Self {
            position: Some(position),
        }
    }

    pub fn denied() -> Self {
        Self { position: None }
    }
}

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationUnavailable> {
        self.position
            .ok_or(GeolocationUnavailable::PermissionDenied)
    }
}
