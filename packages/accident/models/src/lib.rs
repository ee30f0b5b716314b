#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Accident taxonomy types and the accident record model.
//!
//! This crate defines the canonical accident type and severity
//! vocabularies used across the accident-map system, plus the
//! [`AccidentRecord`] that every other crate stores, styles, filters,
//! and renders. The canonical wire strings are the human-readable ones
//! carried by the `GeoJSON` input files and the report form
//! (`"Pedestrian Hit"`, not `PEDESTRIAN_HIT`).

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Category of a road accident.
///
/// Records loaded from data files may carry strings outside this
/// vocabulary; those are preserved verbatim on the record and degrade to
/// the default style rather than failing, so this enum is the *canonical*
/// set, not a validation gate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AccidentType {
    /// Vehicle-to-vehicle collision.
    Collision,
    /// Vehicle overturned.
    Overturn,
    /// Vehicle struck a pedestrian.
    #[serde(rename = "Pedestrian Hit")]
    #[strum(serialize = "Pedestrian Hit")]
    PedestrianHit,
    /// Vehicle struck an animal.
    #[serde(rename = "Animal Hit")]
    #[strum(serialize = "Animal Hit")]
    AnimalHit,
    /// Anything not covered by the other categories.
    Others,
}

impl AccidentType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Collision,
            Self::Overturn,
            Self::PedestrianHit,
            Self::AnimalHit,
            Self::Others,
        ]
    }
}

/// Severity level of a road accident.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AccidentSeverity {
    /// Property damage only, or light injuries.
    Minor,
    /// Injuries requiring treatment.
    Moderate,
    /// Life-threatening injuries or fatalities.
    Severe,
}

impl AccidentSeverity {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Minor, Self::Moderate, Self::Severe]
    }
}

/// One reported accident, as stored in the feature store.
///
/// Each record belongs to exactly one feature store and owns exactly one
/// point geometry. Records are created either by the bulk load at startup
/// or by report intake at submission time, and are never edited or removed
/// for the rest of the session.
///
/// The attribute fields deliberately stay as free text: the input files
/// and the report form are both unvalidated surfaces, and unknown
/// vocabulary degrades to default styling instead of being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentRecord {
    /// Report identifier (`KLA-<year>-ACC-<seq>`). Present on records
    /// created through report intake; the bulk-load files carry none.
    pub report_id: Option<String>,
    /// Position in the map's projected reference frame (Web Mercator
    /// meters), never raw lon/lat.
    pub position: [f64; 2],
    /// Accident category string, normally one of [`AccidentType`].
    pub accident_type: String,
    /// Severity string, normally one of [`AccidentSeverity`].
    pub severity: String,
    /// Number of vehicles involved, as entered (free text).
    pub num_vehicles: String,
    /// Number of casualties, as entered (free text).
    pub num_casualties: String,
    /// Free-text description of the accident.
    pub description: Option<String>,
    /// When the accident occurred, as entered (not validated as a date).
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn type_display_roundtrip() {
        for ty in AccidentType::all() {
            let s = ty.to_string();
            assert_eq!(AccidentType::from_str(&s).unwrap(), *ty);
        }
    }

    #[test]
    fn severity_display_roundtrip() {
        for sev in AccidentSeverity::all() {
            let s = sev.to_string();
            assert_eq!(AccidentSeverity::from_str(&s).unwrap(), *sev);
        }
    }

    #[test]
    fn multi_word_variants_use_spaces() {
        assert_eq!(AccidentType::PedestrianHit.to_string(), "Pedestrian Hit");
        assert_eq!(AccidentType::AnimalHit.to_string(), "Animal Hit");
        assert_eq!(
            AccidentType::from_str("Pedestrian Hit").unwrap(),
            AccidentType::PedestrianHit
        );
    }

    #[test]
    fn unknown_strings_do_not_parse() {
        assert!(AccidentType::from_str("Collission").is_err());
        assert!(AccidentSeverity::from_str("Fatal").is_err());
    }

    #[test]
    fn record_serializes_with_snake_case_keys() {
        let record = AccidentRecord {
            report_id: Some("KLA-2025-ACC-007".to_string()),
            position: [3_627_798.0, 38_720.0],
            accident_type: "Collision".to_string(),
            severity: "Minor".to_string(),
            num_vehicles: "2".to_string(),
            num_casualties: "0".to_string(),
            description: None,
            timestamp: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["accident_type"], "Collision");
        assert_eq!(json["num_casualties"], "0");
        assert!(json["description"].is_null());
    }
}
