//! Popup controller: pixel pick, hit-test, and attribute rendering.

use accident_map_accident_models::AccidentRecord;

use crate::filter::FilterState;
use crate::store::FeatureStore;
use crate::style;
use crate::view::{LayerId, MapView};

/// A positioned, read-only attribute overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    /// Anchor position in the projected frame (the picked coordinate).
    pub position: [f64; 2],
    /// Attribute text, one line per field.
    pub lines: Vec<String>,
}

impl PopupContent {
    /// The attribute text as a single block.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Owns the popup overlay state across clicks.
///
/// A click that hits nothing leaves the previous content in place — the
/// overlay only ever moves or updates, it is never dismissed.
#[derive(Debug, Default)]
pub struct PopupController {
    content: Option<PopupContent>,
}

impl PopupController {
    /// Creates a controller with no popup shown.
    #[must_use]
    pub const fn new() -> Self {
        Self { content: None }
    }

    /// Currently displayed content, if any.
    #[must_use]
    pub const fn content(&self) -> Option<&PopupContent> {
        self.content.as_ref()
    }

    /// Handles a pointer pick at viewport pixel coordinates.
    ///
    /// Hit-tests the topmost rendered accident feature at the pixel:
    /// records are tested newest-first, suppressed records and records
    /// on a hidden layer are not pickable, and the hit radius is the
    /// feature's styled radius plus its stroke width. On a hit the popup
    /// moves to the picked coordinate and renders the record's
    /// attributes; otherwise nothing changes.
    pub fn handle_click(
        &mut self,
        pixel: [f64; 2],
        store: &FeatureStore,
        filters: &FilterState,
        view: &MapView,
    ) -> Option<&PopupContent> {
        if !view.is_visible(LayerId::Accidents) {
            return None;
        }

        let hit = store
            .iter()
            .rev()
            .filter(|record| !record.accident_type.is_empty())
            .find(|record| {
                style::resolve(record, filters).is_some_and(|point_style| {
                    let feature_pixel = view.map_to_pixel(record.position);
                    let dx = feature_pixel[0] - pixel[0];
                    let dy = feature_pixel[1] - pixel[1];
                    dx.hypot(dy) <= point_style.radius + point_style.stroke_width
                })
            })?;

        self.content = Some(PopupContent {
            position: view.pixel_to_map(pixel),
            lines: attribute_lines(hit),
        });

        self.content.as_ref()
    }
}

/// Renders a record's attributes as read-only text lines. Absent
/// optional fields display `N/A`.
fn attribute_lines(record: &AccidentRecord) -> Vec<String> {
    vec![
        format!("{} ({})", record.accident_type, record.severity),
        format!("Vehicles: {}", record.num_vehicles),
        format!("Casualties: {}", record.num_casualties),
        format!("Time: {}", record.timestamp.as_deref().unwrap_or("N/A")),
        format!(
            "Description: {}",
            record.description.as_deref().unwrap_or("N/A")
        ),
    ]
}

#[cfg(test)]
mod tests {
    use accident_map_accident_models::AccidentType;

    use super::*;
    use crate::filter::Selection;

    fn record(accident_type: &str, severity: &str, position: [f64; 2]) -> AccidentRecord {
        AccidentRecord {
            report_id: None,
            position,
            accident_type: accident_type.to_string(),
            severity: severity.to_string(),
            num_vehicles: "2".to_string(),
            num_casualties: "1".to_string(),
            description: None,
            timestamp: None,
        }
    }

    fn view() -> MapView {
        MapView::new([0.0, 0.0], 12.0, 1024, 768)
    }

    #[test]
    fn click_on_feature_shows_attributes_with_fallbacks() {
        let view = view();
        let store = FeatureStore::from_records(vec![record("Collision", "Minor", [0.0, 0.0])]);
        let mut popup = PopupController::new();

        let pixel = view.map_to_pixel([0.0, 0.0]);
        let content = popup
            .handle_click(pixel, &store, &FilterState::new(), &view)
            .unwrap();

        assert_eq!(content.lines[0], "Collision (Minor)");
        assert_eq!(content.lines[1], "Vehicles: 2");
        assert_eq!(content.lines[2], "Casualties: 1");
        assert_eq!(content.lines[3], "Time: N/A");
        assert_eq!(content.lines[4], "Description: N/A");
        assert!(content.text().starts_with("Collision (Minor)\nVehicles: 2\n"));
    }

    #[test]
    fn topmost_record_wins_on_overlap() {
        let view = view();
        let store = FeatureStore::from_records(vec![
            record("Collision", "Severe", [0.0, 0.0]),
            record("Overturn", "Severe", [0.0, 0.0]),
        ]);
        let mut popup = PopupController::new();

        let pixel = view.map_to_pixel([0.0, 0.0]);
        let content = popup
            .handle_click(pixel, &store, &FilterState::new(), &view)
            .unwrap();

        assert!(content.lines[0].starts_with("Overturn"));
    }

    #[test]
    fn suppressed_records_are_not_pickable() {
        let view = view();
        let store = FeatureStore::from_records(vec![record("Collision", "Minor", [0.0, 0.0])]);
        let filters = FilterState {
            selected_type: Selection::Only(AccidentType::Overturn),
            selected_severity: Selection::All,
        };
        let mut popup = PopupController::new();

        let pixel = view.map_to_pixel([0.0, 0.0]);
        assert!(popup.handle_click(pixel, &store, &filters, &view).is_none());
        assert!(popup.content().is_none());
    }

    #[test]
    fn hidden_layer_is_not_pickable() {
        let mut view = view();
        view.set_visible(LayerId::Accidents, false);
        let store = FeatureStore::from_records(vec![record("Collision", "Minor", [0.0, 0.0])]);
        let mut popup = PopupController::new();

        let pixel = view.map_to_pixel([0.0, 0.0]);
        assert!(
            popup
                .handle_click(pixel, &store, &FilterState::new(), &view)
                .is_none()
        );
    }

    #[test]
    fn missed_click_keeps_previous_content() {
        let view = view();
        let store = FeatureStore::from_records(vec![record("Collision", "Minor", [0.0, 0.0])]);
        let mut popup = PopupController::new();

        let hit_pixel = view.map_to_pixel([0.0, 0.0]);
        popup.handle_click(hit_pixel, &store, &FilterState::new(), &view);
        let before = popup.content().cloned();

        // Far away from any feature.
        popup.handle_click([0.0, 0.0], &store, &FilterState::new(), &view);
        assert_eq!(popup.content().cloned(), before);
    }

    #[test]
    fn hit_radius_tracks_severity() {
        let view = view();
        let store = FeatureStore::from_records(vec![record("Collision", "Severe", [0.0, 0.0])]);
        let mut popup = PopupController::new();

        let center = view.map_to_pixel([0.0, 0.0]);
        // Severe radius 14 + stroke 2: a 15px-offset click still hits.
        let content = popup.handle_click(
            [center[0] + 15.0, center[1]],
            &store,
            &FilterState::new(),
            &view,
        );
        assert!(content.is_some());

        // 17px misses.
        let mut fresh = PopupController::new();
        assert!(
            fresh
                .handle_click(
                    [center[0] + 17.0, center[1]],
                    &store,
                    &FilterState::new(),
                    &view,
                )
                .is_none()
        );
    }
}
