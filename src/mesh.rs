//! Accumulated mesh buffer and vertex welding.
//!
//! Wall strips are generated independently per edge; [WallMesh] stitches
//! them into one buffer, welding vertices that fall within `merge_distance`
//! of one another so that adjacent strips share vertex indices instead of
//! leaving duplicate coincident points.

use nalgebra::Vector3;

use crate::config::KernelConfig;
use crate::scene_grid::{new_map, MapType};
use crate::walls::WallStrip;

/// A quad face, 4 indices into [WallMesh::vertices].
pub type Face = [usize; 4];

/// The accumulated geometry for one generation run: a flat vertex buffer and
/// a list of quad faces referencing it.
#[derive(Clone, Debug, Default)]
pub struct WallMesh {
    pub vertices: Vec<Vector3<f64>>,
    pub faces: Vec<Face>,
    /// Maps a quantized vertex cell to its index in `vertices`, for welding.
    weld_index: MapType<(i64, i64, i64), usize>,
}

impl WallMesh {
    pub fn new() -> Self {
        WallMesh {
            vertices: Vec::new(),
            faces: Vec::new(),
            weld_index: new_map(),
        }
    }

    /// Builds a mesh directly from a vertex/face buffer, bypassing welding.
    /// Used by validator tests that need to construct synthetic degenerate
    /// geometry.
    #[cfg(test)]
    pub(crate) fn from_raw(vertices: Vec<Vector3<f64>>, faces: Vec<Face>) -> Self {
        WallMesh {
            vertices,
            faces,
            weld_index: new_map(),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.weld_index.clear();
    }

    /// Appends a wall strip's vertices (welding ones within `tolerance` of an
    /// existing vertex) and its faces, remapped to the welded indices.
    pub fn push_strip(&mut self, strip: &WallStrip, tolerance: f64) {
        let mut local_to_global = [0usize; 8];
        for (i, v) in strip.verts.iter().enumerate() {
            local_to_global[i] = self.weld_vertex(*v, tolerance);
        }
        for face in strip.faces {
            self.faces.push([
                local_to_global[face[0]],
                local_to_global[face[1]],
                local_to_global[face[2]],
                local_to_global[face[3]],
            ]);
        }
    }

    fn weld_vertex(&mut self, v: Vector3<f64>, tolerance: f64) -> usize {
        let cell = quantize_cell(v, tolerance);
        if let Some(&idx) = self.weld_index.get(&cell) {
            return idx;
        }
        let idx = self.vertices.len();
        self.vertices.push(v);
        self.weld_index.insert(cell, idx);
        idx
    }

    /// Edge -> number of incident faces, keyed by a direction-independent
    /// vertex-index pair. Used by the validator to detect non-manifold edges.
    pub fn edge_incidence(&self) -> MapType<(usize, usize), u32> {
        let mut counts: MapType<(usize, usize), u32> = new_map();
        for face in &self.faces {
            for i in 0..4 {
                let a = face[i];
                let b = face[(i + 1) % 4];
                let key = if a <= b { (a, b) } else { (b, a) };
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Area of a quad face via the shoelace formula on its (assumed planar) vertices.
    pub fn face_area(&self, face: &Face) -> f64 {
        let v: Vec<Vector3<f64>> = face.iter().map(|&i| self.vertices[i]).collect();
        // Split the quad into two triangles and sum their areas; works for
        // the planar quads this module always produces.
        let tri_area = |a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>| {
            (b - a).cross(&(c - a)).norm() * 0.5
        };
        tri_area(v[0], v[1], v[2]) + tri_area(v[0], v[2], v[3])
    }

    /// Length of the shortest edge on `face`.
    pub fn shortest_edge(&self, face: &Face) -> f64 {
        let v: Vec<Vector3<f64>> = face.iter().map(|&i| self.vertices[i]).collect();
        (0..4)
            .map(|i| (v[i] - v[(i + 1) % 4]).norm())
            .fold(f64::INFINITY, f64::min)
    }
}

fn quantize_cell(v: Vector3<f64>, tolerance: f64) -> (i64, i64, i64) {
    let step = tolerance.max(1e-9);
    (
        (v.x / step).round() as i64,
        (v.y / step).round() as i64,
        (v.z / step).round() as i64,
    )
}

/// Welds a wall strip into `mesh` using the configured merge distance.
pub fn accumulate(mesh: &mut WallMesh, strip: &WallStrip, cfg: &KernelConfig) {
    mesh.push_strip(strip, cfg.merge_distance);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::{ClassifiedEdge, EdgeType};
    use crate::vertical::FloorElevations;
    use crate::walls::build_wall_strip;

    fn sample_strip(cfg: &KernelConfig) -> WallStrip {
        let edge = ClassifiedEdge {
            p1: (0.0, 0.0),
            p2: (4.0, 0.0),
            edge_type: EdgeType::Exterior,
        };
        let elev = FloorElevations {
            base_z: 0.0,
            wall_top_z: 3.0,
            slab_top_z: 3.2,
        };
        build_wall_strip(&edge, &elev, (2.0, 2.0), cfg).unwrap()
    }

    #[test]
    fn single_strip_is_a_closed_hexahedron() {
        let cfg = KernelConfig::default();
        let mut mesh = WallMesh::new();
        accumulate(&mut mesh, &sample_strip(&cfg), &cfg);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.faces.len(), 6);
        // Every edge of a closed hexahedron is shared by exactly 2 faces.
        let incidence = mesh.edge_incidence();
        assert!(incidence.values().all(|&count| count == 2));
    }

    #[test]
    fn welding_merges_coincident_vertices_across_strips() {
        let cfg = KernelConfig::default();
        let mut mesh = WallMesh::new();
        let strip = sample_strip(&cfg);
        accumulate(&mut mesh, &strip, &cfg);
        accumulate(&mut mesh, &strip, &cfg);
        // Second push of an identical strip must reuse all 8 vertices.
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.faces.len(), 12);
    }

    #[test]
    fn face_area_of_axis_aligned_quad_is_correct() {
        let cfg = KernelConfig::default();
        let mut mesh = WallMesh::new();
        accumulate(&mut mesh, &sample_strip(&cfg), &cfg);
        // Bottom face (indices [0,3,2,1]) spans the wall thickness x 4m length.
        let bottom = mesh.faces[4];
        let area = mesh.face_area(&bottom);
        assert!((area - 4.0 * cfg.wall_thickness).abs() < 1e-6);
    }
}
