//! The style resolver: pure mapping from record attributes and filter
//! state to a visual descriptor, or to "suppressed".

use std::str::FromStr as _;

use accident_map_accident_models::{AccidentRecord, AccidentSeverity, AccidentType};
use serde::Serialize;

use crate::filter::FilterState;

/// Fill color for collisions, and the fallback for unrecognized types.
pub const COLOR_COLLISION: &str = "#E74C3C";
/// Fill color for overturns.
pub const COLOR_OVERTURN: &str = "#E67E22";
/// Fill color for pedestrian hits.
pub const COLOR_PEDESTRIAN_HIT: &str = "#F1C40F";
/// Fill color for animal hits.
pub const COLOR_ANIMAL_HIT: &str = "#27AE60";
/// Fill color for the catch-all category.
pub const COLOR_OTHERS: &str = "#2980B9";

/// Point radius for minor accidents, in pixels.
pub const RADIUS_MINOR: f64 = 6.0;
/// Point radius for moderate accidents, in pixels.
pub const RADIUS_MODERATE: f64 = 10.0;
/// Point radius for severe accidents, in pixels.
pub const RADIUS_SEVERE: f64 = 14.0;
/// Fallback radius for unrecognized severities, in pixels.
pub const RADIUS_DEFAULT: f64 = 7.0;

/// Stroke drawn around every accident point.
pub const POINT_STROKE_COLOR: &str = "#fff";
/// Stroke width around every accident point, in pixels.
pub const POINT_STROKE_WIDTH: f64 = 2.0;

/// Visual descriptor for one rendered accident point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointStyle {
    /// Fill color as a hex string.
    pub color: &'static str,
    /// Circle radius in pixels.
    pub radius: f64,
    /// Stroke color as a hex string.
    pub stroke_color: &'static str,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

/// Visual descriptor for the boundary polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolygonStyle {
    /// Stroke color as a hex string.
    pub stroke_color: &'static str,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Fill color as a CSS color string.
    pub fill_color: &'static str,
}

/// The one style the boundary layer is ever drawn with.
pub const BOUNDARY_STYLE: PolygonStyle = PolygonStyle {
    stroke_color: "#2980B9",
    stroke_width: 2.0,
    fill_color: "rgba(41,128,185,0.1)",
};

/// Fill color for a raw accident-type string. Unrecognized types fall
/// back to the collision color instead of failing.
#[must_use]
pub fn color_for(accident_type: &str) -> &'static str {
    AccidentType::from_str(accident_type).map_or(COLOR_COLLISION, |ty| match ty {
        AccidentType::Collision => COLOR_COLLISION,
        AccidentType::Overturn => COLOR_OVERTURN,
        AccidentType::PedestrianHit => COLOR_PEDESTRIAN_HIT,
        AccidentType::AnimalHit => COLOR_ANIMAL_HIT,
        AccidentType::Others => COLOR_OTHERS,
    })
}

/// Point radius for a raw severity string. Unrecognized severities fall
/// back to the default radius instead of failing.
#[must_use]
pub fn radius_for(severity: &str) -> f64 {
    AccidentSeverity::from_str(severity).map_or(RADIUS_DEFAULT, |severity| match severity {
        AccidentSeverity::Minor => RADIUS_MINOR,
        AccidentSeverity::Moderate => RADIUS_MODERATE,
        AccidentSeverity::Severe => RADIUS_SEVERE,
    })
}

/// Resolves a record against the active filters.
///
/// Returns `None` when either filter suppresses the record; otherwise a
/// concrete style whose color and radius depend only on the record's
/// type and severity strings.
#[must_use]
pub fn resolve(record: &AccidentRecord, filters: &FilterState) -> Option<PointStyle> {
    if !filters.matches(record) {
        return None;
    }

    Some(PointStyle {
        color: color_for(&record.accident_type),
        radius: radius_for(&record.severity),
        stroke_color: POINT_STROKE_COLOR,
        stroke_width: POINT_STROKE_WIDTH,
    })
}
