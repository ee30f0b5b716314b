#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Report intake: the `Idle → LocationPending → LocationReady →
//! Submitted` state machine behind the "Add Report" flow.
//!
//! The single suspension point in the whole system lives here: the
//! awaited device-location request on the injected [`LocationProvider`].
//! Everything else — staging the fix, validating the submission
//! precondition, building the record — runs synchronously inside one
//! handler invocation.

pub mod location;
pub mod report_id;

use accident_map_accident_models::AccidentRecord;
use accident_map_geodata::proj;
use thiserror::Error;

pub use location::{FixedLocationProvider, GeoPosition, GeolocationError, LocationProvider};

/// Where the intake flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntakeState {
    /// No report in progress.
    #[default]
    Idle,
    /// A device-location request is outstanding.
    LocationPending,
    /// A fix is staged and the entry form is open.
    LocationReady,
}

/// A successful location fix: the raw coordinate plus its projection
/// into the map frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// The fix projected into the map frame.
    pub position: [f64; 2],
}

impl LocationFix {
    /// The confirmation message surfaced to the user, latitude first to
    /// five decimal places.
    #[must_use]
    pub fn confirmation_message(&self) -> String {
        format!(
            "Location found at: {:.5}, {:.5}",
            self.latitude, self.longitude
        )
    }
}

/// The report entry form's field values, consumed verbatim.
///
/// No numeric validation is applied to the vehicle and casualty counts;
/// they are free text all the way into the record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportForm {
    /// Selected accident type.
    pub accident_type: String,
    /// Selected severity.
    pub severity: String,
    /// Number of vehicles involved, as typed.
    pub num_vehicles: String,
    /// Number of casualties, as typed.
    pub num_casualties: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional occurrence time, as typed.
    pub timestamp: Option<String>,
}

/// Errors from the intake flow. Each maps to a user-facing message; all
/// of them are terminal for the current attempt (nothing retries).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IntakeError {
    /// Submission attempted with no staged location.
    #[error("Click 'Add Report' to get your location first.")]
    MissingStagedLocation,

    /// A second location request while one is already outstanding.
    #[error("A location request is already in progress.")]
    LocationRequestPending,

    /// The device-location request failed.
    #[error("Location error: {0}")]
    Geolocation(#[from] GeolocationError),
}

/// The intake state machine.
///
/// Holds the staged location between a successful fix and form
/// submission. Only one location request may be outstanding at a time; a
/// second request while one is pending is rejected rather than spawning
/// a second callback.
#[derive(Debug, Default)]
pub struct ReportIntake {
    state: IntakeState,
    staged: Option<[f64; 2]>,
}

impl ReportIntake {
    /// Creates an idle intake with nothing staged.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: IntakeState::Idle,
            staged: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> IntakeState {
        self.state
    }

    /// The staged projected coordinate, if a fix has been taken.
    #[must_use]
    pub const fn staged_location(&self) -> Option<[f64; 2]> {
        self.staged
    }

    /// Issues the single asynchronous device-location request.
    ///
    /// On success the fix is projected into the map frame and staged,
    /// and the machine moves to `LocationReady`; the caller reveals the
    /// form and re-centers the view. On failure the machine returns to
    /// `Idle` and the error's message is surfaced; nothing is retried.
    ///
    /// # Errors
    ///
    /// [`IntakeError::LocationRequestPending`] when a request is already
    /// outstanding, or the propagated [`GeolocationError`] when the
    /// device request fails.
    pub async fn request_location(
        &mut self,
        provider: &dyn LocationProvider,
    ) -> Result<LocationFix, IntakeError> {
        if self.state == IntakeState::LocationPending {
            return Err(IntakeError::LocationRequestPending);
        }

        self.state = IntakeState::LocationPending;
        log::info!("Fetching current location...");

        match provider.current_position().await {
            Ok(position) => {
                let projected = proj::from_lon_lat(position.longitude, position.latitude);
                self.staged = Some(projected);
                self.state = IntakeState::LocationReady;

                let fix = LocationFix {
                    longitude: position.longitude,
                    latitude: position.latitude,
                    position: projected,
                };
                log::info!("{}", fix.confirmation_message());
                Ok(fix)
            }
            Err(error) => {
                self.state = IntakeState::Idle;
                log::warn!("Location request failed: {error}");
                Err(error.into())
            }
        }
    }

    /// Builds the record for a form submission.
    ///
    /// Precondition: a staged location must be present; otherwise the
    /// submission is rejected and no record is created. On success the
    /// staged location is cleared and the machine resets to `Idle` (the
    /// `Submitted` state is transient), ready for the next report.
    ///
    /// # Errors
    ///
    /// [`IntakeError::MissingStagedLocation`] when no fix is staged.
    pub fn submit(
        &mut self,
        form: ReportForm,
        report_id: String,
    ) -> Result<AccidentRecord, IntakeError> {
        let Some(position) = self.staged.take() else {
            return Err(IntakeError::MissingStagedLocation);
        };

        self.state = IntakeState::Idle;

        log::info!("Accident report {report_id} submitted");

        Ok(AccidentRecord {
            report_id: Some(report_id),
            position,
            accident_type: form.accident_type,
            severity: form.severity,
            num_vehicles: form.num_vehicles,
            num_casualties: form.num_casualties,
            description: form.description,
            timestamp: form.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    /// A provider that always fails with a fixed cause.
    struct FailingProvider(GeolocationError);

    #[async_trait]
    impl LocationProvider for FailingProvider {
        async fn current_position(&self) -> Result<GeoPosition, GeolocationError> {
            Err(self.0)
        }
    }

    fn form() -> ReportForm {
        ReportForm {
            accident_type: "Animal Hit".to_string(),
            severity: "Minor".to_string(),
            num_vehicles: "1".to_string(),
            num_casualties: "0".to_string(),
            description: None,
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn successful_fix_stages_projected_location() {
        let mut intake = ReportIntake::new();
        let provider = FixedLocationProvider::new(32.6, 0.3);

        let fix = intake.request_location(&provider).await.unwrap();

        assert_eq!(intake.state(), IntakeState::LocationReady);
        assert_eq!(intake.staged_location(), Some(fix.position));
        // Projected, not raw degrees.
        assert!(fix.position[0] > 3_000_000.0);
        assert_eq!(fix.confirmation_message(), "Location found at: 0.30000, 32.60000");
    }

    #[tokio::test]
    async fn each_failure_cause_has_a_distinct_message() {
        let causes = [
            GeolocationError::PermissionDenied,
            GeolocationError::PositionUnavailable,
            GeolocationError::Timeout,
            GeolocationError::Unknown,
        ];

        let mut messages = Vec::new();
        for cause in causes {
            let mut intake = ReportIntake::new();
            let err = intake
                .request_location(&FailingProvider(cause))
                .await
                .unwrap_err();
            assert_eq!(intake.state(), IntakeState::Idle);
            messages.push(err.to_string());
        }

        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), causes.len());
    }

    #[tokio::test]
    async fn submit_without_fix_is_rejected() {
        let mut intake = ReportIntake::new();
        let err = intake
            .submit(form(), "KLA-2025-ACC-001".to_string())
            .unwrap_err();

        assert_eq!(err, IntakeError::MissingStagedLocation);
        assert_eq!(
            err.to_string(),
            "Click 'Add Report' to get your location first."
        );
    }

    #[tokio::test]
    async fn submit_consumes_the_staged_fix() {
        let mut intake = ReportIntake::new();
        let provider = FixedLocationProvider::new(32.6, 0.3);
        let fix = intake.request_location(&provider).await.unwrap();

        let record = intake
            .submit(form(), "KLA-2025-ACC-123".to_string())
            .unwrap();

        assert_eq!(record.position, fix.position);
        assert_eq!(record.accident_type, "Animal Hit");
        assert_eq!(record.report_id.as_deref(), Some("KLA-2025-ACC-123"));
        assert_eq!(intake.state(), IntakeState::Idle);
        assert!(intake.staged_location().is_none());

        // The cycle can begin again, but a second submit needs a new fix.
        let err = intake
            .submit(form(), "KLA-2025-ACC-124".to_string())
            .unwrap_err();
        assert_eq!(err, IntakeError::MissingStagedLocation);
    }
}
