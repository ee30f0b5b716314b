//! The device-location seam.
//!
//! The browser geolocation API is an external collaborator; this module
//! defines the trait the intake state machine awaits on and the
//! four-cause error taxonomy its failures map onto.

use async_trait::async_trait;
use thiserror::Error;

/// A raw geographic fix from the device, in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

/// Errors from a device-location request.
///
/// The four causes are disjoint and each carries its own user-facing
/// message; none of them is retried automatically.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    /// The user denied the location permission prompt.
    #[error("Location permission was denied. Allow location access to add a report.")]
    PermissionDenied,

    /// The device could not produce a position.
    #[error("Your position could not be determined.")]
    PositionUnavailable,

    /// The request did not complete in time.
    #[error("The location request timed out. Try again.")]
    Timeout,

    /// Anything the device API reports outside the other three causes.
    #[error("An unknown error occurred while fetching your location.")]
    Unknown,
}

/// Single-shot device-location request.
///
/// Implementations stand in for the device geolocation API: one call,
/// one position or one error, no cancellation.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Requests the device's current position.
    ///
    /// # Errors
    ///
    /// Returns a [`GeolocationError`] naming which of the four causes
    /// ended the request.
    async fn current_position(&self) -> Result<GeoPosition, GeolocationError>;
}

/// A provider that always answers with a fixed position.
///
/// Stands in for the device API in the CLI driver and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    position: GeoPosition,
}

impl FixedLocationProvider {
    /// Creates a provider pinned to the given lon/lat.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            position: GeoPosition {
                longitude,
                latitude,
            },
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_position(&self) -> Result<GeoPosition, GeolocationError> {
        Ok(self.position)
    }
}
