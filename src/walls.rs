//! Extrusion of a classified edge into a closed wall-strip prism.

use nalgebra::Vector3;

use crate::config::KernelConfig;
use crate::edges::{ClassifiedEdge, EdgeType};
use crate::vertical::FloorElevations;

/// Minimum edge length (meters) below which a normal cannot be computed.
const MIN_EDGE_LENGTH: f64 = 1e-6;

/// Fixed 8-vertex, 6-quad-face hexahedron prism produced by extruding one edge.
#[derive(Clone, Debug, PartialEq)]
pub struct WallStrip {
    pub verts: [Vector3<f64>; 8],
    /// Each face is 4 vertex indices into `verts`, wound CCW as seen from outside.
    pub faces: [[usize; 4]; 6],
}

/// Fixed face topology shared by every wall strip: outer, inner, two caps,
/// bottom, top.
const FACES: [[usize; 4]; 6] = [
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [0, 4, 7, 3],
    [1, 2, 6, 5],
    [0, 3, 2, 1],
    [4, 5, 6, 7],
];

/// Computes the inward-pointing unit normal of the edge `p1 -> p2`, flipping
/// it toward `centroid` if necessary. Returns `(0.0, 0.0)` for degenerate
/// (near-zero-length) edges.
pub fn inward_normal(p1: (f64, f64), p2: (f64, f64), centroid: (f64, f64)) -> (f64, f64) {
    let dx = p2.0 - p1.0;
    let dy = p2.1 - p1.1;
    let length = (dx * dx + dy * dy).sqrt();
    if length < MIN_EDGE_LENGTH {
        return (0.0, 0.0);
    }

    let mut normal = (-dy / length, dx / length);
    let mid = ((p1.0 + p2.0) * 0.5, (p1.1 + p2.1) * 0.5);
    let to_centroid = (centroid.0 - mid.0, centroid.1 - mid.1);
    let dot = normal.0 * to_centroid.0 + normal.1 * to_centroid.1;
    if dot < 0.0 {
        normal = (-normal.0, -normal.1);
    }
    normal
}

/// Builds the 8-vertex/6-face prism for a single classified edge.
///
/// Exterior edges are offset single-sidedly (the outer face sits exactly on
/// the footprint boundary); interior (shared) edges are offset symmetrically
/// about the room boundary.
pub fn build_wall_strip(
    edge: &ClassifiedEdge,
    elev: &FloorElevations,
    centroid: (f64, f64),
    cfg: &KernelConfig,
) -> Option<WallStrip> {
    let normal = inward_normal(edge.p1, edge.p2, centroid);
    if normal == (0.0, 0.0) {
        return None;
    }

    let (offset_out, offset_in) = match edge.edge_type {
        EdgeType::Exterior => (0.0, cfg.wall_thickness),
        EdgeType::Interior => (cfg.wall_thickness / 2.0, cfg.wall_thickness / 2.0),
    };

    let outer = |p: (f64, f64)| (p.0 - normal.0 * offset_out, p.1 - normal.1 * offset_out);
    let inner = |p: (f64, f64)| (p.0 + normal.0 * offset_in, p.1 + normal.1 * offset_in);

    let p1_out = outer(edge.p1);
    let p2_out = outer(edge.p2);
    let p1_in = inner(edge.p1);
    let p2_in = inner(edge.p2);

    let at = |xy: (f64, f64), z: f64| Vector3::new(xy.0, xy.1, z);

    let verts = [
        at(p1_out, elev.base_z),
        at(p2_out, elev.base_z),
        at(p2_in, elev.base_z),
        at(p1_in, elev.base_z),
        at(p1_out, elev.wall_top_z),
        at(p2_out, elev.wall_top_z),
        at(p2_in, elev.wall_top_z),
        at(p1_in, elev.wall_top_z),
    ];

    Some(WallStrip {
        verts,
        faces: FACES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inward_normal_points_toward_centroid() {
        let n = inward_normal((0.0, 0.0), (4.0, 0.0), (2.0, 1.0));
        assert!((n.0 - 0.0).abs() < 1e-9);
        assert!((n.1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn inward_normal_is_zero_for_degenerate_edge() {
        let n = inward_normal((1.0, 1.0), (1.0 + 1e-9, 1.0), (0.0, 0.0));
        assert_eq!(n, (0.0, 0.0));
    }

    #[test]
    fn wall_strip_has_eight_verts_and_six_quad_faces() {
        let cfg = KernelConfig::default();
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
        let strip = build_wall_strip(&edge, &elev, (2.0, 2.0), &cfg).unwrap();
        assert_eq!(strip.verts.len(), 8);
        assert_eq!(strip.faces.len(), 6);
        for face in strip.faces {
            let unique: std::collections::BTreeSet<_> = face.iter().collect();
            assert_eq!(unique.len(), 4);
        }
    }

    #[test]
    fn exterior_offset_places_outer_face_on_the_boundary() {
        let cfg = KernelConfig::default();
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
        let strip = build_wall_strip(&edge, &elev, (2.0, 2.0), &cfg).unwrap();
        // Outer verts (indices 0, 1) should sit exactly on the original edge.
        assert!((strip.verts[0].y - 0.0).abs() < 1e-9);
        assert!((strip.verts[1].y - 0.0).abs() < 1e-9);
        // Inner verts offset inward by wall_thickness.
        assert!((strip.verts[2].y - cfg.wall_thickness).abs() < 1e-9);
    }

    #[test]
    fn interior_offset_is_symmetric() {
        let cfg = KernelConfig::default();
        let edge = ClassifiedEdge {
            p1: (2.0, 0.0),
            p2: (2.0, 2.0),
            edge_type: EdgeType::Interior,
        };
        let elev = FloorElevations {
            base_z: 0.0,
            wall_top_z: 3.0,
            slab_top_z: 3.2,
        };
        let strip = build_wall_strip(&edge, &elev, (1.0, 1.0), &cfg).unwrap();
        let half = cfg.wall_thickness / 2.0;
        assert!((strip.verts[0].x - (2.0 + half)).abs() < 1e-9);
        assert!((strip.verts[2].x - (2.0 - half)).abs() < 1e-9);
    }

    #[test]
    fn zero_length_edge_yields_no_strip() {
        let cfg = KernelConfig::default();
        let edge = ClassifiedEdge {
            p1: (1.0, 1.0),
            p2: (1.0 + 1e-9, 1.0),
            edge_type: EdgeType::Exterior,
        };
        let elev = FloorElevations {
            base_z: 0.0,
            wall_top_z: 3.0,
            slab_top_z: 3.2,
        };
        assert!(build_wall_strip(&edge, &elev, (0.0, 0.0), &cfg).is_none());
    }
}
