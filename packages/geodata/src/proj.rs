//! Spherical Web Mercator forward and inverse projection.
//!
//! This is the map's projected reference frame: record positions, the
//! view center, and the boundary polygon all live in Mercator meters.
//! Equivalent to the mapping library's `fromLonLat`/`toLonLat` pair.

use std::f64::consts::PI;

/// Earth radius of the Web Mercator sphere, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude beyond which the Mercator projection degenerates.
const LAT_LIMIT_DEG: f64 = 85.051_128_779_806_6;

/// Projects a WGS84 lon/lat pair into Web Mercator meters.
///
/// Latitudes outside the projectable range are clamped rather than
/// rejected, matching mapping-library behavior.
#[must_use]
pub fn from_lon_lat(lon: f64, lat: f64) -> [f64; 2] {
    let lat = lat.clamp(-LAT_LIMIT_DEG, LAT_LIMIT_DEG);
    let x = EARTH_RADIUS_M * lon.to_radians();
    let y = EARTH_RADIUS_M * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
    [x, y]
}

/// Inverse projection from Web Mercator meters back to WGS84 (lon, lat).
#[must_use]
pub fn to_lon_lat(position: [f64; 2]) -> (f64, f64) {
    let lon = (position[0] / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (position[1] / EARTH_RADIUS_M).exp().atan() - PI / 2.0).to_degrees();
    (lon, lat)
}
