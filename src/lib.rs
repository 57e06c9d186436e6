//!
//! Deterministic integer-grid geometry kernel for procedural building generation. Entry point is the [orchestrator::generate] function.
//!

/// Axis-aligned bounding boxes for grid objects and mesh bounds.
pub mod aabb;
/// Explicit, immutable kernel configuration (replaces process-wide globals).
pub mod config;
/// Area-based overlap detection for candidate room layouts.
pub mod collision;
/// Per-room-edge exterior/interior classification with shared-edge coalescing.
pub mod edges;
/// Error taxonomy shared by every fallible kernel operation.
pub mod errors;
/// The floorplan collaborator boundary and a deterministic test double.
pub mod floorplan;
/// Quantization and robust footprint union.
pub mod geometry;
/// Grid-placeable objects: the capability contract and closed variants.
pub mod grid_object;
/// Deterministic integer coordinates and meter/unit conversion.
pub mod grid_pos;
/// Accumulated wall mesh buffer and vertex welding.
pub mod mesh;
/// Sequences the per-floor pipeline and writes the export manifest.
pub mod orchestrator;
/// Sparse hashmap-based scene management.
pub mod scene_grid;
/// Mesh validation and the generation gate.
pub mod validator;
/// Floor elevation derivation from story and wall heights.
pub mod vertical;
/// Extrusion of a classified edge into a wall-strip prism.
pub mod walls;

pub use aabb::AxisAlignedBoundingBox;
pub use collision::{can_place_room, check_self_collisions, validate_layout, CollisionResult};
pub use config::{KernelConfig, SnapMode};
pub use edges::{classify_edges, ClassifiedEdge, EdgeType};
pub use errors::{KernelError, KernelResult};
pub use floorplan::{BuildingSpec, FloorLayout, FloorplanSource, RoofType, SingleRoomFloorplan};
pub use geometry::{quantize, quantize_rect, robust_union, Footprint, Rect, Room};
pub use grid_object::{
    build_door, build_wall, build_window, Door, DoorStyle, GridObject, GridSize, Wall,
    WallThicknessClass, Window, WindowStyle,
};
pub use grid_pos::{meters_to_units, snap, units_to_meters, GridPos};
pub use mesh::WallMesh;
pub use orchestrator::{generate, FloorOutput, GenerationOutput};
pub use scene_grid::{SceneBounds, SceneGrid, SceneStats};
pub use validator::{generation_gate, validate_mesh, Finding, ValidationResult};
pub use vertical::{floor_elevations, FloorElevations};
pub use walls::{build_wall_strip, inward_normal, WallStrip};

// TODO: implement the composed Wall+Door+Window slot-alignment system once the
// placement rules for mixing door/window cutouts along a shared wall strip are defined.
