//! Quantization and robust footprint union.
//!
//! Two rectangles that should share an edge after quantization can still
//! produce a hairline [geo::MultiPolygon] if raw floating point coordinates
//! differ by sub-quantum amounts. [robust_union] runs a fallback chain
//! (quantize -> union -> buffer/unbuffer -> coarser quantize) to recover a
//! single simple polygon in that case without merging rooms that genuinely
//! do not touch.

use geo::{Area, BooleanOps, Coord, Polygon};

use crate::config::KernelConfig;
use crate::errors::{KernelError, KernelResult};

/// An axis-aligned rectangle in metric coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Rect {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn area(&self) -> f64 {
        (self.max_x - self.min_x).max(0.0) * (self.max_y - self.min_y).max(0.0)
    }

    /// Returns the 4 corners in CCW order, starting at (min_x, min_y).
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.min_x, self.min_y),
            (self.max_x, self.min_y),
            (self.max_x, self.max_y),
            (self.min_x, self.max_y),
        ]
    }

    fn to_polygon(self) -> Polygon<f64> {
        let c = self.corners();
        Polygon::new(
            geo::LineString::from(vec![c[0], c[1], c[2], c[3], c[0]]),
            vec![],
        )
    }
}

/// A room on a single floor: its footprint rectangle and a stable identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Room {
    pub rect: Rect,
    pub floor_index: u32,
    pub id: u32,
}

/// Snaps a single metric coordinate to the nearest multiple of `micro_unit`.
pub fn quantize(value: f64, cfg: &KernelConfig) -> f64 {
    crate::grid_pos::units_to_meters(crate::grid_pos::meters_to_units(value, cfg), cfg)
}

/// Applies [quantize] to all four bounds of a rectangle.
pub fn quantize_rect(rect: Rect, cfg: &KernelConfig) -> Rect {
    Rect::new(
        quantize(rect.min_x, cfg),
        quantize(rect.min_y, cfg),
        quantize(rect.max_x, cfg),
        quantize(rect.max_y, cfg),
    )
}

/// Result of a footprint union: a single polygon, or a multi-part polygon if
/// every fallback still left disjoint pieces (reported as an error instead,
/// see [robust_union]).
pub type Footprint = Polygon<f64>;

/// Unions a floor's room rectangles into a single footprint polygon.
///
/// Runs the following fallback chain until a simple [Polygon] is produced:
/// 1. Quantize every rectangle to `micro_unit` and union directly.
/// 2. If the union is multi-part, buffer every rectangle outward by half a
///    `micro_unit`, union, then buffer back inward by the same amount. This
///    closes sub-quantum gaps at shared edges.
/// 3. If still multi-part, re-quantize the merged result at the coarser
///    `grid` spacing.
pub fn robust_union(rooms: &[Room], cfg: &KernelConfig) -> KernelResult<Footprint> {
    if rooms.is_empty() {
        return Err(KernelError::EmptyLayout);
    }

    let quantized: Vec<Rect> = rooms
        .iter()
        .map(|r| quantize_rect(r.rect, cfg))
        .filter(|r| r.max_x > r.min_x && r.max_y > r.min_y)
        .collect();

    if quantized.is_empty() {
        return Err(KernelError::EmptyLayout);
    }

    let polys: Vec<Polygon<f64>> = quantized.iter().map(|r| r.to_polygon()).collect();

    if let Some(merged) = union_all(&polys) {
        return Ok(merged);
    }

    // Fallback: buffer outward by epsilon, union, then buffer back inward.
    // This closes hairline gaps left by quantization at shared edges without
    // merging rooms that are genuinely disjoint (epsilon < micro_unit).
    let epsilon = cfg.micro_unit * 0.5;
    let buffered: Vec<Polygon<f64>> = polys
        .iter()
        .map(|p| geo_buffer::buffer_polygon(p, epsilon))
        .flat_map(|mp| mp.into_iter())
        .collect();

    if let Some(merged_buf) = union_all(&buffered) {
        let unbuffered = geo_buffer::buffer_polygon(&merged_buf, -epsilon);
        if let Some(single) = single_polygon(&unbuffered) {
            return Ok(single);
        }

        // Final attempt: coarser quantization of the buffer/unbuffer result,
        // then re-union in case the coarser snap closed the remaining gap.
        let requantized_parts: Vec<Polygon<f64>> = unbuffered
            .0
            .iter()
            .map(|p| requantize_polygon(p, cfg.grid))
            .collect();
        if let Some(single) = union_all(&requantized_parts) {
            return Ok(single);
        }
    }

    Err(KernelError::UnionFailed {
        geom_type: "MultiPolygon".to_string(),
    })
}

/// Unions every polygon in `polys` pairwise; returns `None` if the result is
/// not a single simple polygon.
fn union_all(polys: &[Polygon<f64>]) -> Option<Polygon<f64>> {
    let mut iter = polys.iter();
    let first = iter.next()?;
    let mut acc = geo::MultiPolygon::new(vec![first.clone()]);
    for p in iter {
        acc = acc.union(&geo::MultiPolygon::new(vec![p.clone()]));
    }
    single_polygon(&acc)
}

fn single_polygon(mp: &geo::MultiPolygon<f64>) -> Option<Polygon<f64>> {
    if mp.0.len() == 1 {
        Some(mp.0[0].clone())
    } else {
        None
    }
}

/// Snaps every coordinate of `poly` to a multiple of `step` meters.
fn requantize_polygon(poly: &Polygon<f64>, step: f64) -> Polygon<f64> {
    let snap = |c: Coord<f64>| Coord {
        x: (c.x / step).round() * step,
        y: (c.y / step).round() * step,
    };
    let exterior: Vec<Coord<f64>> = poly.exterior().coords().map(|&c| snap(c)).collect();
    Polygon::new(geo::LineString::from(exterior), vec![])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: u32, rect: Rect) -> Room {
        Room {
            rect,
            floor_index: 0,
            id,
        }
    }

    #[test]
    fn empty_rooms_is_an_error() {
        let cfg = KernelConfig::default();
        assert!(matches!(
            robust_union(&[], &cfg),
            Err(KernelError::EmptyLayout)
        ));
    }

    #[test]
    fn single_room_unit_cube_floor() {
        let cfg = KernelConfig::default();
        let rooms = [room(1, Rect::new(0.0, 0.0, 10.0, 8.0))];
        let footprint = robust_union(&rooms, &cfg).unwrap();
        assert!((footprint.unsigned_area() - 80.0).abs() < 1e-6);
    }

    #[test]
    fn two_touching_rooms_merge_to_one_polygon() {
        let cfg = KernelConfig::default();
        let rooms = [
            room(1, Rect::new(0.0, 0.0, 2.0, 2.0)),
            room(2, Rect::new(2.0, 0.0, 4.0, 2.0)),
        ];
        let footprint = robust_union(&rooms, &cfg).unwrap();
        assert!((footprint.unsigned_area() - 8.0).abs() < 1e-6);
    }

    #[test]
    fn drift_tolerant_union_snaps_to_shared_boundary() {
        let cfg = KernelConfig::default();
        let rooms = [
            room(1, Rect::new(0.0, 0.0, 2.0001, 2.0)),
            room(2, Rect::new(1.9999, 0.0, 4.0, 2.0)),
        ];
        let footprint = robust_union(&rooms, &cfg).unwrap();
        assert!((footprint.unsigned_area() - 8.0).abs() < 1e-3);
    }

    #[test]
    fn quantize_is_idempotent() {
        let cfg = KernelConfig::default();
        let once = quantize(0.124, &cfg);
        let twice = quantize(once, &cfg);
        assert_eq!(once, twice);
        assert_eq!(once, 0.125);
    }

    #[test]
    fn union_is_invariant_under_room_permutation() {
        let cfg = KernelConfig::default();
        let forward = [
            room(1, Rect::new(0.0, 0.0, 2.0, 2.0)),
            room(2, Rect::new(2.0, 0.0, 4.0, 2.0)),
        ];
        let reversed = [forward[1], forward[0]];
        let a = robust_union(&forward, &cfg).unwrap();
        let b = robust_union(&reversed, &cfg).unwrap();
        assert!((a.unsigned_area() - b.unsigned_area()).abs() < 1e-9);
    }
}
