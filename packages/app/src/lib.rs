#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! The application context: one explicit object owning every piece of
//! mutable state the original page kept in globals — the feature store,
//! filter state, view, popup, intake machine, and boundary — constructed
//! once at startup and driven through event-handler methods.
//!
//! Handlers are terminal error boundaries: each returns a user-facing
//! result and never propagates further. All of them run synchronously to
//! completion except [`AppContext::add_report`], whose awaited location
//! request is the system's single suspension point.

use std::path::Path;

use accident_map_accident_models::{AccidentRecord, AccidentSeverity, AccidentType};
use accident_map_geodata::{GeodataError, load, proj};
use accident_map_intake::{
    IntakeError, LocationFix, LocationProvider, ReportForm, ReportIntake, report_id,
};
use accident_map_map::render::{self, RenderFrame};
use accident_map_map::view::{REPORT_ANIMATION, REPORT_ZOOM};
use accident_map_map::{
    FeatureStore, FilterState, LayerId, MapView, PopupContent, PopupController, Selection,
};
use geo::MultiPolygon;
use rand::SeedableRng as _;
use rand::rngs::StdRng;

/// Startup view center, longitude (Kampala).
pub const DEFAULT_CENTER_LON: f64 = 32.5825;
/// Startup view center, latitude (Kampala).
pub const DEFAULT_CENTER_LAT: f64 = 0.3476;
/// Startup zoom level.
pub const DEFAULT_ZOOM: f64 = 12.0;
/// Viewport size the CLI driver renders at, in pixels.
pub const DEFAULT_VIEWPORT: (u32, u32) = (1024, 768);

/// Owns all session state and exposes the event-handler surface.
pub struct AppContext {
    store: FeatureStore,
    filters: FilterState,
    view: MapView,
    popup: PopupController,
    intake: ReportIntake,
    boundary: MultiPolygon<f64>,
    form_visible: bool,
    rng: StdRng,
    frame: RenderFrame,
}

impl AppContext {
    /// Loads both input files and builds the context.
    ///
    /// # Errors
    ///
    /// Returns a [`GeodataError`] when either file cannot be loaded; the
    /// application cannot start without its inputs.
    pub fn startup(boundary_path: &Path, accidents_path: &Path) -> Result<Self, GeodataError> {
        let boundary = load::load_boundary(boundary_path)?;
        let records = load::load_accidents(accidents_path)?;
        Ok(Self::from_parts(boundary, records))
    }

    /// Builds the context from already-loaded data.
    #[must_use]
    pub fn from_parts(boundary: MultiPolygon<f64>, records: Vec<AccidentRecord>) -> Self {
        let center = proj::from_lon_lat(DEFAULT_CENTER_LON, DEFAULT_CENTER_LAT);
        let mut context = Self {
            store: FeatureStore::from_records(records),
            filters: FilterState::new(),
            view: MapView::new(center, DEFAULT_ZOOM, DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1),
            popup: PopupController::new(),
            intake: ReportIntake::new(),
            boundary,
            form_visible: false,
            rng: StdRng::from_entropy(),
            frame: RenderFrame::default(),
        };
        context.repaint();
        context
    }

    /// One full synchronous re-evaluation of the style resolver.
    fn repaint(&mut self) {
        self.frame = render::render_accidents(&self.store, &self.filters, &self.view);
    }

    /// The accident type dropdown changed.
    pub fn set_type_filter(&mut self, selection: Selection<AccidentType>) {
        self.filters.selected_type = selection;
        self.repaint();
    }

    /// The severity dropdown changed.
    pub fn set_severity_filter(&mut self, selection: Selection<AccidentSeverity>) {
        self.filters.selected_severity = selection;
        self.repaint();
    }

    /// A layer checkbox changed. Idempotent; touches neither the filter
    /// state nor the store.
    pub fn set_layer_visible(&mut self, layer: LayerId, visible: bool) {
        self.view.set_visible(layer, visible);
        self.repaint();
    }

    /// A pointer pick on the map at viewport pixel coordinates.
    pub fn map_click(&mut self, pixel: [f64; 2]) -> Option<&PopupContent> {
        self.popup
            .handle_click(pixel, &self.store, &self.filters, &self.view)
    }

    /// The "Add Report" button: issue the device-location request.
    ///
    /// On success the fix is staged, the entry form is revealed, and the
    /// view re-centers on the fix at zoom 16.
    ///
    /// # Errors
    ///
    /// Propagates the intake's rejection (request already pending) or
    /// the geolocation failure; either way no state beyond the intake
    /// machine changes.
    pub async fn add_report(
        &mut self,
        provider: &dyn LocationProvider,
    ) -> Result<LocationFix, IntakeError> {
        let fix = self.intake.request_location(provider).await?;
        self.form_visible = true;
        self.view.animate_to(fix.position, REPORT_ZOOM, REPORT_ANIMATION);
        Ok(fix)
    }

    /// The entry form was submitted.
    ///
    /// Builds the record (fresh report ID, field values verbatim),
    /// appends it to the store, hides the form, and forces a repaint.
    /// The appended record is returned for display.
    ///
    /// # Errors
    ///
    /// [`IntakeError::MissingStagedLocation`] when no location fix is
    /// staged; the store and form state are left untouched.
    pub fn submit_report(&mut self, form: ReportForm) -> Result<AccidentRecord, IntakeError> {
        let report_id = self.unique_report_id();
        let record = self.intake.submit(form, report_id)?;
        self.store.append(record.clone());
        self.form_visible = false;
        self.repaint();
        Ok(record)
    }

    /// Generates a report ID unused by any record in this session.
    ///
    /// There are 999 candidate sequences per year; a session never
    /// exhausts them.
    fn unique_report_id(&mut self) -> String {
        loop {
            let candidate = report_id::generate_report_id(report_id::current_year(), &mut self.rng);
            if !self.store.contains_report_id(&candidate) {
                return candidate;
            }
        }
    }

    /// The feature store.
    #[must_use]
    pub const fn store(&self) -> &FeatureStore {
        &self.store
    }

    /// The active filters.
    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// The map view.
    #[must_use]
    pub const fn view(&self) -> &MapView {
        &self.view
    }

    /// The boundary polygon (display-only).
    #[must_use]
    pub const fn boundary(&self) -> &MultiPolygon<f64> {
        &self.boundary
    }

    /// The most recent render frame.
    #[must_use]
    pub const fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    /// Whether the report entry form is currently shown.
    #[must_use]
    pub const fn form_visible(&self) -> bool {
        self.form_visible
    }

    /// The popup's current content, if any.
    #[must_use]
    pub const fn popup_content(&self) -> Option<&PopupContent> {
        self.popup.content()
    }
}
