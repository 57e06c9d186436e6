//! Grid-placeable objects: the capability contract and its closed variants.
//!
//! The original exposes grid-placeable entities through a structural
//! protocol plus a mixin supplying default behavior. Rust has no structural
//! typing, so the contract is modeled as an object-safe trait with default
//! methods, and the concrete catalogue is closed to three variants
//! ([Wall], [Door], [Window]) rather than left open-ended.

use std::collections::BTreeSet;

use crate::aabb::AxisAlignedBoundingBox;
use crate::config::KernelConfig;
use crate::grid_pos::GridPos;
use crate::scene_grid::SceneGrid;

/// Size of a grid object's footprint, in integer grid units (width, depth, height).
pub type GridSize = (i64, i64, i64);

/// Capability set shared by every object that can be placed on a [SceneGrid].
pub trait GridObject {
    fn name(&self) -> &str;
    fn grid_pos(&self) -> GridPos;
    fn grid_size(&self) -> GridSize;
    fn snap_mode(&self) -> &str;
    fn tags(&self) -> &BTreeSet<String>;

    /// The set of cells this object occupies. Default is the full AABB;
    /// overriding to carve out concavities is supported but not required.
    fn footprint(&self) -> BTreeSet<(i64, i64, i64)> {
        let (sx, sy, sz) = self.grid_size();
        let pos = self.grid_pos();
        let mut cells = BTreeSet::new();
        for dx in 0..sx {
            for dy in 0..sy {
                for dz in 0..sz {
                    cells.insert((pos.x + dx, pos.y + dy, pos.z + dz));
                }
            }
        }
        cells
    }

    /// Whether this object could be placed into `scene` without collision.
    fn validate_placement(&self, scene: &SceneGrid) -> bool {
        scene.is_free(self.grid_pos(), self.grid_size())
    }

    /// Bounding box of this object, converted to meters.
    fn aabb(&self, cfg: &KernelConfig) -> AxisAlignedBoundingBox {
        let pos = self.grid_pos();
        let (sx, sy, sz) = self.grid_size();
        let min = GridPos::new(pos.x, pos.y, pos.z).to_meters(cfg);
        let max = GridPos::new(pos.x + sx, pos.y + sy, pos.z + sz).to_meters(cfg);
        AxisAlignedBoundingBox::new([min.0, min.1, min.2], [max.0, max.1, max.2])
    }

    /// Integer-grid center of this object (half-size, integer division).
    fn center(&self) -> GridPos {
        let pos = self.grid_pos();
        let (sx, sy, sz) = self.grid_size();
        GridPos::new(pos.x + sx / 2, pos.y + sy / 2, pos.z + sz / 2)
    }
}

/// Wall thickness class, drawn from the wall standards table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallThicknessClass {
    Thin,
    Standard,
    Thick,
}

/// A placeable wall segment.
#[derive(Clone, Debug)]
pub struct Wall {
    pub name: String,
    pub grid_pos: GridPos,
    pub grid_size: GridSize,
    pub thickness_class: WallThicknessClass,
    pub tags: BTreeSet<String>,
}

impl GridObject for Wall {
    fn name(&self) -> &str {
        &self.name
    }
    fn grid_pos(&self) -> GridPos {
        self.grid_pos
    }
    fn grid_size(&self) -> GridSize {
        self.grid_size
    }
    fn snap_mode(&self) -> &str {
        "meso"
    }
    fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

/// Door style, drawn from the door standards table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorStyle {
    Single,
    Double,
    Garage,
}

impl DoorStyle {
    pub fn standard_key(self) -> &'static str {
        match self {
            DoorStyle::Single => "single",
            DoorStyle::Double => "double",
            DoorStyle::Garage => "garage",
        }
    }
}

/// A placeable door.
#[derive(Clone, Debug)]
pub struct Door {
    pub name: String,
    pub grid_pos: GridPos,
    pub grid_size: GridSize,
    pub style: DoorStyle,
    pub material: Option<String>,
    pub tags: BTreeSet<String>,
}

impl GridObject for Door {
    fn name(&self) -> &str {
        &self.name
    }
    fn grid_pos(&self) -> GridPos {
        self.grid_pos
    }
    fn grid_size(&self) -> GridSize {
        self.grid_size
    }
    fn snap_mode(&self) -> &str {
        "meso"
    }
    fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

/// Window style, drawn from the window standards table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowStyle {
    Small,
    Standard,
    Large,
    Panoramic,
}

impl WindowStyle {
    pub fn standard_key(self) -> &'static str {
        match self {
            WindowStyle::Small => "small",
            WindowStyle::Standard => "standard",
            WindowStyle::Large => "large",
            WindowStyle::Panoramic => "panoramic",
        }
    }
}

/// A placeable window.
#[derive(Clone, Debug)]
pub struct Window {
    pub name: String,
    pub grid_pos: GridPos,
    pub grid_size: GridSize,
    pub style: WindowStyle,
    pub sill_height: f64,
    pub glass_inner: Option<String>,
    pub glass_outer: Option<String>,
    pub tags: BTreeSet<String>,
}

impl GridObject for Window {
    fn name(&self) -> &str {
        &self.name
    }
    fn grid_pos(&self) -> GridPos {
        self.grid_pos
    }
    fn grid_size(&self) -> GridSize {
        self.grid_size
    }
    fn snap_mode(&self) -> &str {
        "meso"
    }
    fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

/// Builds a [Wall] whose `grid_size` matches the given length/height in meters
/// and the standard thickness for `class`.
pub fn build_wall(
    name: impl Into<String>,
    grid_pos: GridPos,
    length_m: f64,
    height_m: f64,
    class: WallThicknessClass,
    cfg: &KernelConfig,
) -> Wall {
    let thickness_m = match class {
        WallThicknessClass::Thin => cfg.wall_standards.thickness_thin,
        WallThicknessClass::Standard => cfg.wall_standards.thickness_standard,
        WallThicknessClass::Thick => cfg.wall_standards.thickness_thick,
    };
    Wall {
        name: name.into(),
        grid_pos,
        grid_size: (
            crate::grid_pos::meters_to_units(length_m, cfg),
            crate::grid_pos::meters_to_units(thickness_m, cfg),
            crate::grid_pos::meters_to_units(height_m, cfg),
        ),
        thickness_class: class,
        tags: BTreeSet::new(),
    }
}

/// Builds a [Door] whose `grid_size` matches the standard entry for `style`.
pub fn build_door(
    name: impl Into<String>,
    grid_pos: GridPos,
    style: DoorStyle,
    thickness_m: f64,
    cfg: &KernelConfig,
) -> Door {
    let standard = cfg.door_standards[style.standard_key()];
    Door {
        name: name.into(),
        grid_pos,
        grid_size: (
            crate::grid_pos::meters_to_units(standard.width, cfg),
            crate::grid_pos::meters_to_units(thickness_m, cfg),
            crate::grid_pos::meters_to_units(standard.height, cfg),
        ),
        style,
        material: None,
        tags: BTreeSet::new(),
    }
}

/// Builds a [Window] whose `grid_size` and `sill_height` match the standard entry for `style`.
pub fn build_window(
    name: impl Into<String>,
    grid_pos: GridPos,
    style: WindowStyle,
    thickness_m: f64,
    cfg: &KernelConfig,
) -> Window {
    let standard = cfg.window_standards[style.standard_key()];
    Window {
        name: name.into(),
        grid_pos,
        grid_size: (
            crate::grid_pos::meters_to_units(standard.width, cfg),
            crate::grid_pos::meters_to_units(thickness_m, cfg),
            crate::grid_pos::meters_to_units(standard.height, cfg),
        ),
        style,
        sill_height: standard.sill,
        glass_inner: None,
        glass_outer: None,
        tags: BTreeSet::new(),
    }
}
