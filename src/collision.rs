//! Area-based overlap detection for candidate room layouts.

use crate::config::KernelConfig;
use crate::geometry::Room;

/// A single pairwise overlap between two rooms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionResult {
    pub room_a: u32,
    pub room_b: u32,
    pub overlap_area: f64,
}

/// Minimum overlap area, as a multiple of `micro_unit^2`, to be treated as a
/// genuine collision rather than quantization noise.
const OVERLAP_NOISE_FACTOR: f64 = 0.1;

fn overlap_area(a: &Room, b: &Room) -> f64 {
    let ox = (a.rect.max_x.min(b.rect.max_x) - a.rect.min_x.max(b.rect.min_x)).max(0.0);
    let oy = (a.rect.max_y.min(b.rect.max_y) - a.rect.min_y.max(b.rect.min_y)).max(0.0);
    ox * oy
}

fn is_significant(area: f64, cfg: &KernelConfig) -> bool {
    area > cfg.micro_unit * cfg.micro_unit * OVERLAP_NOISE_FACTOR
}

/// Finds every pairwise overlap among `rooms` whose area exceeds the noise
/// threshold. O(n^2) in the number of rooms.
pub fn check_self_collisions(rooms: &[Room], cfg: &KernelConfig) -> Vec<CollisionResult> {
    let mut collisions = Vec::new();
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            let area = overlap_area(&rooms[i], &rooms[j]);
            if is_significant(area, cfg) {
                collisions.push(CollisionResult {
                    room_a: rooms[i].id,
                    room_b: rooms[j].id,
                    overlap_area: area,
                });
            }
        }
    }
    collisions
}

/// Whether `candidate` can be placed among `rooms`, ignoring any room whose
/// id is in `exclude_ids`.
pub fn can_place_room(candidate: &Room, rooms: &[Room], exclude_ids: &[u32], cfg: &KernelConfig) -> bool {
    rooms
        .iter()
        .filter(|r| !exclude_ids.contains(&r.id))
        .all(|r| !is_significant(overlap_area(candidate, r), cfg))
}

/// Validates an entire layout, returning `Ok(())` or an error message listing
/// every conflicting pair, formatted as `"LAYOUT_CONFLICT: ..."`.
pub fn validate_layout(rooms: &[Room], cfg: &KernelConfig) -> Result<(), String> {
    let collisions = check_self_collisions(rooms, cfg);
    if collisions.is_empty() {
        return Ok(());
    }

    let details: Vec<String> = collisions
        .iter()
        .map(|c| {
            format!(
                "overlap_area={:.4} ids=[{}, {}]",
                c.overlap_area, c.room_a, c.room_b
            )
        })
        .collect();
    Err(format!("LAYOUT_CONFLICT: {}", details.join("; ")))
}
