//! View state: visible region, viewport, and layer visibility.

use std::time::Duration;

use strum_macros::{AsRefStr, Display, EnumString};

/// Resolution at zoom level 0 for 256px tiles, in meters per pixel.
const ZOOM_0_RESOLUTION: f64 = 156_543.033_928_040_97;

/// Zoom level the view animates to after a successful location fix.
pub const REPORT_ZOOM: f64 = 16.0;

/// Duration of the recenter animation after a location fix.
pub const REPORT_ANIMATION: Duration = Duration::from_millis(500);

/// The four independently toggleable layers, in z-order (first drawn
/// first, accidents on top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum LayerId {
    /// OSM basemap tiles.
    #[strum(serialize = "osm")]
    OsmBasemap,
    /// Satellite basemap tiles.
    #[strum(serialize = "satellite")]
    SatelliteBasemap,
    /// Kampala boundary polygon.
    #[strum(serialize = "boundary")]
    Boundary,
    /// Accident point layer.
    #[strum(serialize = "accidents")]
    Accidents,
}

impl LayerId {
    /// All layers in z-order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::OsmBasemap,
            Self::SatelliteBasemap,
            Self::Boundary,
            Self::Accidents,
        ]
    }

    const fn index(self) -> usize {
        match self {
            Self::OsmBasemap => 0,
            Self::SatelliteBasemap => 1,
            Self::Boundary => 2,
            Self::Accidents => 3,
        }
    }
}

/// The map view: center, zoom, viewport size, and per-layer visibility.
///
/// Positions are in the projected frame (Web Mercator meters); pixels
/// have their origin at the viewport's top-left with y growing downward.
#[derive(Debug, Clone)]
pub struct MapView {
    center: [f64; 2],
    zoom: f64,
    width: u32,
    height: u32,
    visibility: [bool; 4],
}

impl MapView {
    /// Creates a view at the given projected center and zoom.
    ///
    /// Default layer visibility matches startup: OSM and the vector
    /// layers on, the satellite basemap off.
    #[must_use]
    pub const fn new(center: [f64; 2], zoom: f64, width: u32, height: u32) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
            visibility: [true, false, true, true],
        }
    }

    /// Current center in the projected frame.
    #[must_use]
    pub const fn center(&self) -> [f64; 2] {
        self.center
    }

    /// Current zoom level.
    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Meters per pixel at the current zoom.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        ZOOM_0_RESOLUTION / 2_f64.powf(self.zoom)
    }

    /// Whether a layer is currently visible.
    #[must_use]
    pub const fn is_visible(&self, layer: LayerId) -> bool {
        self.visibility[layer.index()]
    }

    /// Sets one layer's visibility. Idempotent; no other state changes.
    pub fn set_visible(&mut self, layer: LayerId, visible: bool) {
        self.visibility[layer.index()] = visible;
        log::debug!("Layer {layer} visibility set to {visible}");
    }

    /// Recenters and zooms the view, as the post-fix animation does.
    ///
    /// The animation itself is the rasterizer's concern; the view state
    /// jumps straight to the target.
    pub fn animate_to(&mut self, center: [f64; 2], zoom: f64, duration: Duration) {
        self.center = center;
        self.zoom = zoom;
        log::debug!(
            "Animating view to ({:.1}, {:.1}) at zoom {zoom} over {}ms",
            center[0],
            center[1],
            duration.as_millis()
        );
    }

    /// Converts a projected position to viewport pixel coordinates.
    #[must_use]
    pub fn map_to_pixel(&self, position: [f64; 2]) -> [f64; 2] {
        let resolution = self.resolution();
        [
            (position[0] - self.center[0]) / resolution + f64::from(self.width) / 2.0,
            (self.center[1] - position[1]) / resolution + f64::from(self.height) / 2.0,
        ]
    }

    /// Converts viewport pixel coordinates back to a projected position.
    #[must_use]
    pub fn pixel_to_map(&self, pixel: [f64; 2]) -> [f64; 2] {
        let resolution = self.resolution();
        [
            (pixel[0] - f64::from(self.width) / 2.0) * resolution + self.center[0],
            self.center[1] - (pixel[1] - f64::from(self.height) / 2.0) * resolution,
        ]
    }
}
