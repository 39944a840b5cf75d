//! Geolocation Port - Optional device position for completed records.

use async_trait::async_trait;

use crate::domain::foundation::GeoPoint;

/// The provider could not or would not report a position.
///
/// Never fatal; the record is stored without `localizacao`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationUnavailable {
    #[error("Permission to read the position was denied")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

/// Port for asking the device where it is
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Current position, asked at most once per completed flow
    async fn current_position(&self) -> Result<GeoPoint, GeolocationUnavailable>;
}
