//! The floorplan collaborator boundary: room layout is generated externally;
//! the kernel only consumes the resulting rectangles.

use crate::geometry::{Rect, Room};

/// High-level building parameters driving generation.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildingSpec {
    pub width: f64,
    pub depth: f64,
    pub floors: u32,
    pub seed: u64,
    pub roof_type: RoofType,
}

/// Supported roof styles. Roof geometry generation is out of scope; this is
/// carried through to the manifest only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoofType {
    Flat,
    Gabled,
    Hip,
    Shed,
}

impl std::fmt::Display for RoofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RoofType::Flat => "flat",
            RoofType::Gabled => "gabled",
            RoofType::Hip => "hip",
            RoofType::Shed => "shed",
        };
        write!(f, "{s}")
    }
}

impl BuildingSpec {
    pub fn validate(&self) -> Result<(), crate::errors::KernelError> {
        if self.width <= 0.0 || self.depth <= 0.0 {
            return Err(crate::errors::KernelError::InvalidSpec {
                reason: "width and depth must be positive".to_string(),
            });
        }
        if self.floors == 0 {
            return Err(crate::errors::KernelError::InvalidSpec {
                reason: "floors must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// A generated floor layout: the room rectangles and an optional corridor id
/// (kept abstract, since corridor geometry is floorplan-internal).
#[derive(Clone, Debug, PartialEq)]
pub struct FloorLayout {
    pub rooms: Vec<Room>,
}

/// The external collaborator that turns a building spec into per-floor room
/// layouts. The kernel is generic over this trait so it never depends on a
/// concrete floorplan algorithm.
pub trait FloorplanSource {
    fn generate_floorplan(&self, spec: &BuildingSpec, floor_index: u32) -> FloorLayout;
}

/// A deterministic single-room floorplan, covering the full footprint on
/// every floor. Used by tests and benches in place of a real room-layout
/// heuristic.
pub struct SingleRoomFloorplan;

impl FloorplanSource for SingleRoomFloorplan {
    fn generate_floorplan(&self, spec: &BuildingSpec, floor_index: u32) -> FloorLayout {
        FloorLayout {
            rooms: vec![Room {
                rect: Rect::new(0.0, 0.0, spec.width, spec.depth),
                floor_index,
                id: 1,
            }],
        }
    }
}
