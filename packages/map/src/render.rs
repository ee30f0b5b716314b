//! The full-repaint render pass.
//!
//! Every state mutation that can change what is drawn (filter change,
//! layer toggle, store append) triggers one synchronous pass over the
//! whole store; there is no incremental update and no debouncing.

use accident_map_accident_models::AccidentRecord;
use serde::Serialize;

use crate::filter::FilterState;
use crate::store::FeatureStore;
use crate::style::{self, PointStyle};
use crate::view::{LayerId, MapView};

/// One positioned, styled accident point in a render frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPoint {
    /// Index of the source record in the feature store.
    pub index: usize,
    /// Position in the projected frame.
    pub position: [f64; 2],
    /// The record's raw accident type string.
    pub accident_type: String,
    /// The record's raw severity string.
    pub severity: String,
    /// Resolved visual style.
    pub style: PointStyle,
}

/// The ordered output of one repaint, consumed by the rasterizer.
///
/// Points appear in store order, so later (user-submitted) records stack
/// on top of earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderFrame {
    /// The points to draw, bottom to top.
    pub points: Vec<RenderedPoint>,
}

impl RenderFrame {
    /// Number of points in the frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the frame draws nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Re-evaluates the style resolver over every record in the store.
///
/// An invisible accidents layer yields an empty frame without touching
/// the resolver; suppressed records are omitted.
#[must_use]
pub fn render_accidents(
    store: &FeatureStore,
    filters: &FilterState,
    view: &MapView,
) -> RenderFrame {
    if !view.is_visible(LayerId::Accidents) {
        return RenderFrame::default();
    }

    let points: Vec<RenderedPoint> = store
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            style::resolve(record, filters).map(|point_style| RenderedPoint {
                index,
                position: record.position,
                accident_type: record.accident_type.clone(),
                severity: record.severity.clone(),
                style: point_style,
            })
        })
        .collect();

    log::debug!("Repainted {} of {} record(s)", points.len(), store.len());

    RenderFrame { points }
}
