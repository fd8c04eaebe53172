//! Distance units.
//!
//! The document store reports spherical distances as central angles in radians.
//! Clients see kilometres.

/// Mean Earth radius in kilometres (3959 for miles).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Convert a store distance (radians) to kilometres.
pub fn radians_to_km(radians: f64) -> f64 {
    radians * EARTH_RADIUS_KM
}
