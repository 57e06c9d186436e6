//! Classification of room edges into exterior (building shell) and interior
//! (shared wall) edges, with shared-edge coalescing.

use std::collections::BTreeSet;

use geo::{Line, Relate};

use crate::config::KernelConfig;
use crate::geometry::{quantize, Footprint, Room};

/// Which side of a floor's footprint an edge belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeType {
    /// Lies on the building's outer boundary.
    Exterior,
    /// Separates two adjacent rooms on the same floor.
    Interior,
}

/// A room edge with its endpoints (quantized) and classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifiedEdge {
    pub p1: (f64, f64),
    pub p2: (f64, f64),
    pub edge_type: EdgeType,
}

/// A direction-independent key identifying an edge regardless of winding,
/// with endpoints quantized so that numerically adjacent rooms share
/// identical keys.
type CanonicalEdgeKey = ((i64, i64), (i64, i64));

fn canonical_edge(p1: (f64, f64), p2: (f64, f64), cfg: &KernelConfig) -> CanonicalEdgeKey {
    let q = |p: (f64, f64)| {
        (
            crate::grid_pos::meters_to_units(quantize(p.0, cfg), cfg),
            crate::grid_pos::meters_to_units(quantize(p.1, cfg), cfg),
        )
    };
    let a = q(p1);
    let b = q(p2);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Classifies every room edge on a floor as exterior or interior.
///
/// Shared edges between two rooms are emitted once (first occurrence,
/// room-major / CCW-within-room order is preserved).
pub fn classify_edges(footprint: &Footprint, rooms: &[Room], cfg: &KernelConfig) -> Vec<ClassifiedEdge> {
    let boundary = footprint.exterior();
    let mut seen: BTreeSet<CanonicalEdgeKey> = BTreeSet::new();
    let mut result = Vec::new();

    for room in rooms {
        let corners = room.rect.corners();
        for i in 0..4 {
            let p1 = corners[i];
            let p2 = corners[(i + 1) % 4];
            let key = canonical_edge(p1, p2, cfg);
            if !seen.insert(key) {
                continue;
            }

            let edge_line = Line::new(p1, p2);
            let edge_type = if boundary.relate(&edge_line).is_covers() {
                EdgeType::Exterior
            } else {
                EdgeType::Interior
            };

            result.push(ClassifiedEdge {
                p1,
                p2,
                edge_type,
            });
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{robust_union, Rect, Room};

    fn room(id: u32, rect: Rect) -> Room {
        Room {
            rect,
            floor_index: 0,
            id,
        }
    }

    #[test]
    fn unit_cube_floor_has_four_exterior_edges() {
        let cfg = KernelConfig::default();
        let rooms = [room(1, Rect::new(0.0, 0.0, 10.0, 8.0))];
        let footprint = robust_union(&rooms, &cfg).unwrap();
        let edges = classify_edges(&footprint, &rooms, &cfg);
        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(|e| e.edge_type == EdgeType::Exterior));
    }

    #[test]
    fn shared_wall_is_classified_interior_exactly_once() {
        let cfg = KernelConfig::default();
        let rooms = [
            room(1, Rect::new(0.0, 0.0, 2.0, 2.0)),
            room(2, Rect::new(2.0, 0.0, 4.0, 2.0)),
        ];
        let footprint = robust_union(&rooms, &cfg).unwrap();
        let edges = classify_edges(&footprint, &rooms, &cfg);
        assert_eq!(edges.len(), 7);
        let interior: Vec<_> = edges
            .iter()
            .filter(|e| e.edge_type == EdgeType::Interior)
            .collect();
        assert_eq!(interior.len(), 1);
        let e = interior[0];
        let shared_x = 2.0;
        assert!((e.p1.0 - shared_x).abs() < 1e-6 && (e.p2.0 - shared_x).abs() < 1e-6);
    }

    #[test]
    fn classification_is_stable_under_room_permutation() {
        let cfg = KernelConfig::default();
        let forward = [
            room(1, Rect::new(0.0, 0.0, 2.0, 2.0)),
            room(2, Rect::new(2.0, 0.0, 4.0, 2.0)),
        ];
        let reversed = [forward[1], forward[0]];
        let footprint = robust_union(&forward, &cfg).unwrap();
        let a = classify_edges(&footprint, &forward, &cfg);
        let b = classify_edges(&footprint, &reversed, &cfg);
        let interior_count = |v: &[ClassifiedEdge]| {
            v.iter()
                .filter(|e| e.edge_type == EdgeType::Interior)
                .count()
        };
        assert_eq!(interior_count(&a), interior_count(&b));
    }
}
