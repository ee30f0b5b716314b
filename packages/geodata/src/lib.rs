#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! `GeoJSON` loading and projection for the accident map.
//!
//! Parses the two startup input documents — the Kampala boundary polygon
//! and the accident point collection — into projected geometry, and
//! provides the spherical Web Mercator forward/inverse conversions that
//! define the map's projected reference frame. Every coordinate handed to
//! the rest of the system has already been projected; raw lon/lat only
//! exists at this crate's boundary and at the geolocation seam.

pub mod load;
pub mod proj;

use thiserror::Error;

/// Errors from loading the `GeoJSON` input files.
#[derive(Debug, Error)]
pub enum GeodataError {
    /// Reading the input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    Geojson(#[from] geojson::Error),

    /// The document parsed but did not contain usable geometry.
    #[error("Geometry error: {message}")]
    Geometry {
        /// Description of what was missing or unsupported.
        message: String,
    },
}
