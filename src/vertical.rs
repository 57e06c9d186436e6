//! Derivation of floor elevations from story and wall heights.
//!
//! Every other component that needs a Z coordinate derives it from
//! [floor_elevations] rather than repeating the `story_height` arithmetic.

use crate::config::KernelConfig;

/// The three elevations that matter for a single floor, in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorElevations {
    /// Elevation of the floor slab / room floor.
    pub base_z: f64,
    /// Elevation of the top of the walls on this floor.
    pub wall_top_z: f64,
    /// Elevation of the slab above this floor (= next floor's base_z).
    pub slab_top_z: f64,
}

/// Computes the elevations for floor `index` (0-based).
pub fn floor_elevations(index: u32, cfg: &KernelConfig) -> FloorElevations {
    let base_z = index as f64 * cfg.story_height;
    FloorElevations {
        base_z,
        wall_top_z: base_z + cfg.wall_height,
        slab_top_z: base_z + cfg.story_height,
    }
}
