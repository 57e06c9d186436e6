//! Sparse hashmap-based scene management.
//!
//! Only occupied cells consume memory, so the grid is effectively infinite.
//! Collision checks are O(1) per cell because occupancy is a hashmap lookup
//! rather than a dense array scan.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{KernelError, KernelResult};
use crate::grid_object::{GridObject, GridSize};
use crate::grid_pos::GridPos;

pub(crate) type HashState = fxhash::FxBuildHasher;
pub(crate) type MapType<K, V> = std::collections::HashMap<K, V, HashState>;
pub(crate) fn new_map<K, V>() -> MapType<K, V> {
    MapType::with_hasher(HashState::default())
}

/// Aggregate counters returned by [SceneGrid::get_stats].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneStats {
    pub occupied_cells: usize,
    pub object_count: usize,
    /// Rough memory usage estimate, in bytes.
    pub memory_estimate: usize,
}

/// Min/max bounds over all occupied cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneBounds {
    pub min: GridPos,
    pub max: GridPos,
}

/// Scene-level grid manager backed by a sparse hashmap.
///
/// Maintains two maps in lockstep: `cells` (occupied cell -> owning object
/// name) and `objects` (name -> object). Every successful [SceneGrid::place]
/// keeps them mutually consistent; [SceneGrid::remove] undoes both atomically.
pub struct SceneGrid {
    cells: MapType<(i64, i64, i64), String>,
    objects: MapType<String, Box<dyn GridObject>>,
}

impl Default for SceneGrid {
    fn default() -> Self {
        SceneGrid::new()
    }
}

impl SceneGrid {
    pub fn new() -> Self {
        SceneGrid {
            cells: new_map(),
            objects: new_map(),
        }
    }

    /// Places `obj` on the grid.
    ///
    /// Returns `Ok(true)` on success, `Ok(false)` if the footprint collides
    /// with an existing object, and `Err(DuplicateName)` if an object with
    /// the same name is already present.
    pub fn place(&mut self, obj: Box<dyn GridObject>) -> KernelResult<bool> {
        if self.objects.contains_key(obj.name()) {
            return Err(KernelError::DuplicateName {
                name: obj.name().to_string(),
            });
        }

        let footprint = obj.footprint();
        if footprint.iter().any(|cell| self.cells.contains_key(cell)) {
            return Ok(false);
        }

        for cell in &footprint {
            self.cells.insert(*cell, obj.name().to_string());
        }
        self.objects.insert(obj.name().to_string(), obj);
        Ok(true)
    }

    /// Removes the named object and frees its cells. Returns false if absent.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(obj) = self.objects.remove(name) else {
            return false;
        };
        for cell in obj.footprint() {
            self.cells.remove(&cell);
        }
        true
    }

    pub fn get_at(&self, pos: GridPos) -> Option<&str> {
        self.cells.get(&pos.to_tuple()).map(|s| s.as_str())
    }

    /// True iff every cell in the `size`-shaped region starting at `pos` is unoccupied.
    pub fn is_free(&self, pos: GridPos, size: GridSize) -> bool {
        let (sx, sy, sz) = size;
        for dx in 0..sx {
            for dy in 0..sy {
                for dz in 0..sz {
                    if self
                        .cells
                        .contains_key(&(pos.x + dx, pos.y + dy, pos.z + dz))
                    {
                        return false;
                    }
                }
            }
        }
        true
    }

    pub fn get_object(&self, name: &str) -> Option<&dyn GridObject> {
        self.objects.get(name).map(|b| b.as_ref())
    }

    pub fn get_all_objects(&self) -> Vec<&dyn GridObject> {
        self.objects.values().map(|b| b.as_ref()).collect()
    }

    pub fn get_objects_by_tag(&self, tag: &str) -> Vec<&dyn GridObject> {
        self.objects
            .values()
            .filter(|obj| obj.tags().contains(tag))
            .map(|b| b.as_ref())
            .collect()
    }

    /// All occupied cells within the Chebyshev ball of `radius` around `pos`.
    pub fn get_neighbors(&self, pos: GridPos, radius: i64) -> Vec<(GridPos, String)> {
        let mut found = Vec::new();
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                for dz in -radius..=radius {
                    let cell = (pos.x + dx, pos.y + dy, pos.z + dz);
                    if let Some(name) = self.cells.get(&cell) {
                        found.push((GridPos::new(cell.0, cell.1, cell.2), name.clone()));
                    }
                }
            }
        }
        found
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.objects.clear();
    }

    pub fn get_bounds(&self) -> Option<SceneBounds> {
        if self.cells.is_empty() {
            return None;
        }
        let mut min = (i64::MAX, i64::MAX, i64::MAX);
        let mut max = (i64::MIN, i64::MIN, i64::MIN);
        for &(x, y, z) in self.cells.keys() {
            min = (min.0.min(x), min.1.min(y), min.2.min(z));
            max = (max.0.max(x), max.1.max(y), max.2.max(z));
        }
        Some(SceneBounds {
            min: GridPos::new(min.0, min.1, min.2),
            max: GridPos::new(max.0, max.1, max.2),
        })
    }

    pub fn get_stats(&self) -> SceneStats {
        SceneStats {
            occupied_cells: self.cells.len(),
            object_count: self.objects.len(),
            memory_estimate: self.cells.len() * 64 + self.objects.len() * 256,
        }
    }

    /// Serializes scene occupancy to a deterministic JSON string.
    ///
    /// Cell and object entries are passed through a [BTreeMap] first so the
    /// output is byte-identical across runs, regardless of hashmap iteration
    /// order.
    pub fn to_json(&self) -> KernelResult<String> {
        let cells: BTreeMap<String, &str> = self
            .cells
            .iter()
            .map(|(&(x, y, z), name)| (format!("{x},{y},{z}"), name.as_str()))
            .collect();
        let objects: BTreeMap<&str, ObjectSummary> = self
            .objects
            .iter()
            .map(|(name, obj)| {
                (
                    name.as_str(),
                    ObjectSummary {
                        grid_pos: obj.grid_pos().to_tuple(),
                        grid_size: obj.grid_size(),
                        snap_mode: obj.snap_mode().to_string(),
                        tags: obj.tags().iter().cloned().collect(),
                    },
                )
            })
            .collect();
        let doc = SceneDocument { cells, objects };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Restores cell occupancy from a JSON document produced by [SceneGrid::to_json].
    ///
    /// Object instances are not reconstructed: the caller is responsible for
    /// re-placing concrete [GridObject] values using its own factory, as the
    /// serialized summary is not enough to rebuild a closed variant.
    pub fn from_json(json_str: &str) -> KernelResult<SceneGrid> {
        let doc: SceneDocumentOwned = serde_json::from_str(json_str)?;
        let mut scene = SceneGrid::new();
        for (key, name) in doc.cells {
            let mut parts = key.split(',');
            let (Some(x), Some(y), Some(z), None) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                return Err(KernelError::Unknown(anyhow::anyhow!(
                    "malformed cell key: {key}"
                )));
            };
            let parse = |s: &str| -> KernelResult<i64> {
                s.parse()
                    .map_err(|_| KernelError::Unknown(anyhow::anyhow!("malformed cell key: {s}")))
            };
            scene.cells.insert((parse(x)?, parse(y)?, parse(z)?), name);
        }
        Ok(scene)
    }
}

#[derive(Serialize)]
struct ObjectSummary<'a> {
    grid_pos: (i64, i64, i64),
    grid_size: GridSize,
    snap_mode: String,
    tags: Vec<&'a str>,
}

#[derive(Serialize)]
struct SceneDocument<'a> {
    cells: BTreeMap<String, &'a str>,
    objects: BTreeMap<&'a str, ObjectSummary<'a>>,
}

#[derive(Deserialize)]
struct SceneDocumentOwned {
    cells: BTreeMap<String, String>,
    #[allow(dead_code)]
    #[serde(default)]
    objects: BTreeMap<String, serde_json::Value>,
}

impl std::fmt::Debug for SceneGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.get_stats();
        write!(
            f,
            "SceneGrid(objects={}, cells={}, memory~{}B)",
            stats.object_count, stats.occupied_cells, stats.memory_estimate
        )
    }
}
